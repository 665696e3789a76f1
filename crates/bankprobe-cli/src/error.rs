//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// A smoke flow ran but the app showed a failure
    #[error("Smoke flow '{flow}' failed: {message}")]
    SmokeFailed {
        /// Flow name
        flow: String,
        /// What the app reported
        message: String,
    },

    /// Bankprobe library error
    #[error("Bankprobe error: {0}")]
    Bank(#[from] bankprobe::BankProbeError),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a smoke failure
    #[must_use]
    pub fn smoke_failed(flow: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SmokeFailed {
            flow: flow.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("width must be positive");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_smoke_failed_error() {
        let err = CliError::smoke_failed("login", "Invalid credentials");
        assert_eq!(
            err.to_string(),
            "Smoke flow 'login' failed: Invalid credentials"
        );
    }

    #[test]
    fn test_library_error_from() {
        let err = bankprobe::BankProbeError::configuration("no platform");
        let cli_err: CliError = err.into();
        assert!(cli_err.to_string().contains("no platform"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
