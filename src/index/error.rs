use std::path::PathBuf;
use thiserror::Error;

use crate::constants::DimValidationError;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Snapshot files absent at startup. Recovered by starting empty.
    #[error("index snapshot not found at {path}")]
    SnapshotMissing { path: PathBuf },

    #[error("failed to read index snapshot: {reason}")]
    SnapshotRead { reason: String },

    #[error("index snapshot is corrupt: {reason}")]
    SnapshotCorrupt { reason: String },

    /// Vector file length disagrees with the metadata file's record count.
    #[error("snapshot vectors misaligned with metadata: expected {expected} floats, got {actual}")]
    SnapshotMisaligned { expected: usize, actual: usize },

    #[error(transparent)]
    Dimension(#[from] DimValidationError),

    #[error("record store reconciliation failed: {reason}")]
    ReconcileFailed { reason: String },
}

pub type IndexResult<T> = Result<T, IndexError>;
