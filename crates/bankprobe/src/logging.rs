//! Logging sinks and subscriber setup.
//!
//! Components receive an `Arc<dyn LogSink>` at construction instead of
//! reaching for a global logger. [`TracingSink`] forwards to `tracing`;
//! [`MemorySink`] keeps records for assertions.

use crate::result::{BankProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Execution log file name inside the logs directory
pub const LOG_FILE_NAME: &str = "test_execution.log";

/// One structured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity
    pub level: Level,
    /// Emitting component (e.g. `MobileActions`, `LoginPage`)
    pub component: String,
    /// Message text
    pub message: String,
}

/// Destination for leveled log lines
pub trait LogSink: Send + Sync + std::fmt::Debug {
    /// Record one line
    fn log(&self, level: Level, component: &str, message: &str);

    /// Debug-level line
    fn debug(&self, component: &str, message: &str) {
        self.log(Level::DEBUG, component, message);
    }

    /// Info-level line
    fn info(&self, component: &str, message: &str) {
        self.log(Level::INFO, component, message);
    }

    /// Warn-level line
    fn warn(&self, component: &str, message: &str) {
        self.log(Level::WARN, component, message);
    }

    /// Error-level line
    fn error(&self, component: &str, message: &str) {
        self.log(Level::ERROR, component, message);
    }
}

/// Sink that forwards to the installed `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Shared handle
    #[must_use]
    pub fn shared() -> Arc<dyn LogSink> {
        Arc::new(Self)
    }
}

impl LogSink for TracingSink {
    fn log(&self, level: Level, component: &str, message: &str) {
        if level == Level::ERROR {
            tracing::error!(component, "{message}");
        } else if level == Level::WARN {
            tracing::warn!(component, "{message}");
        } else if level == Level::INFO {
            tracing::info!(component, "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(component, "{message}");
        } else {
            tracing::trace!(component, "{message}");
        }
    }
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Records whose message contains `needle`
    #[must_use]
    pub fn matching(&self, needle: &str) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.message.contains(needle))
            .collect()
    }

    /// Records at exactly `level`
    #[must_use]
    pub fn at_level(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    /// Drop all records
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, component: &str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                component: component.to_string(),
                message: message.to_string(),
            });
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. `info`)
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
    /// Also append to `<dir>/test_execution.log`
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default level directive
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Toggle JSON output
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Write to a log file inside `dir`
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Path of the log file, if file output is enabled
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }

    fn filter(&self) -> ProbeResult<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| {
                BankProbeError::configuration(format!("invalid log level '{}': {e}", self.level))
            })
    }
}

/// Install the global `tracing` subscriber.
///
/// Console output goes to stderr; stdout belongs to the caller.
/// Fails when the level directive is invalid, the log directory cannot be
/// created, or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> ProbeResult<()> {
    let filter = config.filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match (config.log_file(), config.json) {
        (Some(path), json) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        (None, true) => builder.with_writer(std::io::stderr).json().try_init(),
        (None, false) => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| BankProbeError::configuration(format!("logging already initialised: {e}")))
}
