use thiserror::Error;

use crate::index::IndexError;
use crate::store::StoreError;

/// Request-level failures. Everything recoverable (missing rules, embedding
/// outages) is absorbed earlier in the pipeline; only approval-time write
/// failures surface to the caller.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("index write failed: {0}")]
    IndexWrite(#[from] IndexError),

    #[error("record store write failed: {0}")]
    StoreWrite(#[from] StoreError),
}
