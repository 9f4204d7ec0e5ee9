//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `MASTHEAD_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_EMBEDDING_DIM;
use crate::index::SnapshotPaths;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `MASTHEAD_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// SQLite database file for the title record store. Default: `./data/titles.db`.
    pub db_path: PathBuf,

    /// Snapshot vector file (raw f32 rows). Default: `./data/title_vectors.bin`.
    pub vectors_path: PathBuf,

    /// Snapshot metadata file (JSON title records). Default: `./data/title_records.json`.
    pub titles_path: PathBuf,

    /// Rules document. Default: `./data/disallowed_rules.json`.
    pub rules_path: PathBuf,

    /// Base URL of the embedding model service. Default: `http://127.0.0.1:8100`.
    pub embed_url: String,

    /// Embedding dimension of the deployed model. Default: `384`.
    pub embedding_dim: usize,
}

/// Default model-service URL used when `MASTHEAD_EMBED_URL` is not set.
pub const DEFAULT_EMBED_URL: &str = "http://127.0.0.1:8100";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            db_path: PathBuf::from("./data/titles.db"),
            vectors_path: PathBuf::from("./data/title_vectors.bin"),
            titles_path: PathBuf::from("./data/title_records.json"),
            rules_path: PathBuf::from("./data/disallowed_rules.json"),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "MASTHEAD_PORT";
    const ENV_BIND_ADDR: &'static str = "MASTHEAD_BIND_ADDR";
    const ENV_DB_PATH: &'static str = "MASTHEAD_DB_PATH";
    const ENV_VECTORS_PATH: &'static str = "MASTHEAD_VECTORS_PATH";
    const ENV_TITLES_PATH: &'static str = "MASTHEAD_TITLES_PATH";
    const ENV_RULES_PATH: &'static str = "MASTHEAD_RULES_PATH";
    const ENV_EMBED_URL: &'static str = "MASTHEAD_EMBED_URL";
    const ENV_EMBEDDING_DIM: &'static str = "MASTHEAD_EMBEDDING_DIM";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let db_path = Self::parse_path_from_env(Self::ENV_DB_PATH, defaults.db_path);
        let vectors_path = Self::parse_path_from_env(Self::ENV_VECTORS_PATH, defaults.vectors_path);
        let titles_path = Self::parse_path_from_env(Self::ENV_TITLES_PATH, defaults.titles_path);
        let rules_path = Self::parse_path_from_env(Self::ENV_RULES_PATH, defaults.rules_path);
        let embed_url = Self::parse_string_from_env(Self::ENV_EMBED_URL, defaults.embed_url);
        let embedding_dim = Self::parse_dim_from_env(defaults.embedding_dim)?;

        Ok(Self {
            port,
            bind_addr,
            db_path,
            vectors_path,
            titles_path,
            rules_path,
            embed_url,
            embedding_dim,
        })
    }

    /// Validates basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.db_path, &self.rules_path, &self.vectors_path, &self.titles_path] {
            if path.exists() && path.is_dir() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// The two snapshot file locations as one value.
    pub fn snapshot_paths(&self) -> SnapshotPaths {
        SnapshotPaths::new(self.vectors_path.clone(), self.titles_path.clone())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_dim_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_EMBEDDING_DIM) {
            Ok(value) => match value.parse::<usize>() {
                Ok(dim) if dim > 0 => Ok(dim),
                _ => Err(ConfigError::InvalidEmbeddingDim { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
