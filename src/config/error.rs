use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port value '{value}': {source}")]
    PortParseError {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("port must be non-zero, got '{value}'")]
    InvalidPort { value: String },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid embedding dimension '{value}'")]
    InvalidEmbeddingDim { value: String },

    #[error("path exists but is a directory: {path}")]
    NotAFile { path: PathBuf },
}
