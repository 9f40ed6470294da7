//! Error types for the test-instantiation generator.

use std::path::PathBuf;
use thiserror::Error;

/// Generator errors. Every variant is fatal; generation is offline and
/// deterministic so nothing here is retried.
#[derive(Debug, Error)]
pub enum GenError {
    /// A shard came out of the splitter larger than the hard ceiling.
    #[error(
        "Too many types for a single instantiation: \
         shard '{name}' holds {len} types (ceiling {ceiling})"
    )]
    ShardTooLarge {
        name: String,
        len: usize,
        ceiling: usize,
    },

    /// Generator settings that can never produce a valid run.
    #[error("Invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GenError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the configuration class of failures (catalog or limits are inconsistent).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GenError::ShardTooLarge { .. } | GenError::InvalidSettings(_) | GenError::Config(_)
        )
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for GenError {
    fn from(err: toml::ser::Error) -> Self {
        GenError::Serialization(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;
