//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants (e.g. byte sizes) from primary ones to avoid drift.
//!
//! # Dimension Invariants
//!
//! The embedding dimension is treated as a deployment-wide invariant across the
//! embedding client, the snapshot loader and the vector store. Use
//! [`validate_embedding_dim`] at module boundaries to catch mismatches early
//! instead of corrupting the ordinal→vector alignment deep in the index.

/// Embedding dimension of the deployed sentence-encoder (384-dim MiniLM family).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;
pub const EMBEDDING_F32_BYTES: usize = DEFAULT_EMBEDDING_DIM * 4;

/// Number of nearest neighbors consulted by the similarity scorer.
pub const TOP_K_NEIGHBORS: usize = 5;

/// Similarity scores and probabilities are percentages in `[0, PERCENT_SCALE]`.
pub const PERCENT_SCALE: f32 = 100.0;

/// A candidate is approved iff its similarity score is strictly below this cutoff.
pub const APPROVAL_SIMILARITY_CUTOFF: f32 = 50.0;

/// A semantic neighbor produces an explanation detail above this score.
pub const SEMANTIC_DETAIL_THRESHOLD: f32 = 40.0;

/// A phonetic comparison produces an explanation detail above this score.
pub const PHONETIC_DETAIL_THRESHOLD: f32 = 60.0;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries (embedder construction, snapshot loading) rather
/// than encountering silent misalignment in the vector store.
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
