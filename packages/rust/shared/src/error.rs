//! Error types for buildnotify.
//!
//! Library crates use [`NotifyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Delivery failures never show up here; `buildnotify-webex` reports them
//! as a `DeliveryOutcome`.

use std::path::PathBuf;

/// Top-level error type for all buildnotify operations.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// HTTP client construction error.
    #[error("network error: {0}")]
    Network(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid input value (unknown CI flavor, malformed URL, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NotifyError>;

impl NotifyError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
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
        let err = NotifyError::config("unknown CI system");
        assert_eq!(err.to_string(), "config error: unknown CI system");

        let err = NotifyError::validation("flavor 'travis' not supported");
        assert!(err.to_string().contains("'travis'"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = NotifyError::io("/tmp/buildnotify.toml", source);
        let msg = err.to_string();
        assert!(msg.contains("buildnotify.toml"));
        assert!(msg.contains("gone"));
    }
}
