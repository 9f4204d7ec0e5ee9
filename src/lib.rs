//! Masthead library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Pipeline (Stable)
//! - [`VerificationEngine`], [`VerificationDecision`] - The decision pipeline
//! - [`HybridTitleIndex`], [`TitleLookup`] - Exact + nearest-neighbor title index
//! - [`RuleSet`], [`RuleFilter`] - Lexical rule checks
//! - [`CombinationDetector`], [`SimilarityScorer`] - Remaining pipeline stages
//!
//! ## Collaborator Interfaces
//! - [`Embedder`], [`RemoteEmbedder`] - Embedding provider
//! - [`TitleStore`], [`SqliteTitleStore`] - Durable record store
//!
//! ## Utilities
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`SnapshotPaths`], [`TitleSnapshot`] - Index snapshot I/O
//! - [`phonetic`] - Pure string comparators
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod combination;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod index;
pub mod phonetic;
pub mod rules;
pub mod scoring;
pub mod store;
pub mod verify;

pub use combination::CombinationDetector;
pub use config::{Config, ConfigError, DEFAULT_EMBED_URL};
pub use constants::{
    APPROVAL_SIMILARITY_CUTOFF, DEFAULT_EMBEDDING_DIM, DimValidationError, TOP_K_NEIGHBORS,
    validate_embedding_dim,
};
pub use embedding::{Embedder, EmbeddingError, RemoteEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::StubEmbedder;
pub use gateway::{
    HandlerState, MASTHEAD_STATUS_ERROR, MASTHEAD_STATUS_HEADER, MASTHEAD_STATUS_HEALTHY,
    MASTHEAD_STATUS_READY, create_router_with_state,
};
pub use index::{
    HybridTitleIndex, HydrationSummary, IndexError, IndexResult, SnapshotPaths, SnapshotRecord,
    TitleLookup, TitleSnapshot, normalize_key,
};
#[cfg(any(test, feature = "mock"))]
pub use index::StaticLookup;
pub use phonetic::{PhoneticComparison, jaro_winkler, metaphone};
pub use rules::{RuleFilter, RuleOutcome, RuleSet, RuleSetError};
pub use scoring::{SimilarityReport, SimilarityScorer};
pub use store::{InsertOutcome, SqliteTitleStore, StoreError, TitleStore};
#[cfg(any(test, feature = "mock"))]
pub use store::MemoryTitleStore;
pub use verify::{
    CheckDetail, CheckType, TitleStatus, VerificationDecision, VerificationEngine, VerifyError,
    VerifyStage,
};
