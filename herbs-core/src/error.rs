//! Structured error types for herbs-core.
//!
//! Uses `thiserror` so library consumers get composable errors.
//! The CLI wraps these with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML or has wrong value types
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Explicitly requested config file does not exist
    #[error("Config file not found: {path:?}")]
    ConfigNotFound { path: PathBuf },
}

/// Result type alias for herbs-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an I/O error bound to the file being read
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a missing config file error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config_not_found("/tmp/missing.toml");
        assert_eq!(
            err.to_string(),
            "Config file not found: \"/tmp/missing.toml\""
        );

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = CoreError::io("/etc/herbs.toml", io_err);
        assert!(err.to_string().contains("/etc/herbs.toml"));
        assert!(err.to_string().contains("denied"));
    }
}
