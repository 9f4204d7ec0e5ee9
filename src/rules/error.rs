use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleSetError {
    /// The rules document does not exist. Callers degrade to empty rule
    /// lists; this variant exists so they (and tests) can observe it.
    #[error("rules document not found at {path}")]
    Missing { path: PathBuf },

    #[error("failed to read rules document: {0}")]
    Io(#[from] std::io::Error),

    #[error("rules document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
