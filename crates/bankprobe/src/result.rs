//! Result and error types for Bankprobe.

use crate::driver::DriverError;
use crate::locator::Locator;
use crate::platform::Platform;
use thiserror::Error;

/// Result type for Bankprobe operations
pub type ProbeResult<T> = Result<T, BankProbeError>;

/// Errors that can occur in Bankprobe
#[derive(Debug, Error)]
pub enum BankProbeError {
    /// Symbolic name absent from the active registry (programming error)
    #[error("Unknown element '{name}' on page '{page}' for platform {platform}")]
    UnknownElement {
        /// Page whose registry was consulted
        page: String,
        /// Active platform
        platform: Platform,
        /// Symbolic name that was requested
        name: String,
    },

    /// Element did not appear before the wait elapsed
    #[error("Element not found: {locator} (waited {timeout_ms}ms)")]
    ElementNotFound {
        /// Locator that was polled
        locator: Locator,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// Element was found but the action on it failed
    #[error("Failed to {action} element {locator}: {source}")]
    Interaction {
        /// Action that was attempted (click, type, ...)
        action: &'static str,
        /// Locator of the element
        locator: Locator,
        /// Underlying driver fault
        source: DriverError,
    },

    /// Unsupported or missing configuration value
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Driver fault outside an element action
    #[error("Driver error during {context}: {source}")]
    Transport {
        /// What was being done
        context: String,
        /// Underlying driver fault
        source: DriverError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BankProbeError {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a transport error with context
    #[must_use]
    pub fn transport(context: impl Into<String>, source: DriverError) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    /// True when the error means "the element was absent"
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}
