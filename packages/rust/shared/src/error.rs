//! Error types for PersonScope.
//!
//! Library crates use [`PersonScopeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Provider outcomes (not found, credits exhausted, unconfigured) are not
//! errors; they travel as outcome variants. This type covers the failures
//! that sit outside that taxonomy.

use std::path::PathBuf;

/// Top-level error type for PersonScope operations.
#[derive(Debug, thiserror::Error)]
pub enum PersonScopeError {
    /// Configuration value error (bad base URL, missing home directory).
    #[error("config error: {message}")]
    Config { message: String },

    /// HTTP client construction or transport error.
    #[error("network error: {0}")]
    Network(String),

    /// Config file decoding error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PersonScopeError>;

impl PersonScopeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PersonScopeError::config("missing search engine id");
        assert_eq!(err.to_string(), "config error: missing search engine id");

        let err = PersonScopeError::parse("expected `]`");
        assert_eq!(err.to_string(), "parse error: expected `]`");
    }
}
