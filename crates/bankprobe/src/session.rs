//! Driver lifecycle
//!
//! A [`Session`] owns one remote driver session for one test flow. The
//! session is ended exactly once: by [`Session::quit`], or by `Drop` on any
//! other exit path, including a panicking assertion.
//!
//! ```rust,ignore
//! let session = Session::start(&config, TracingSink::shared())?;
//! LoginPage::new(&session).login("demo_user@example.com", "Password123")?;
//! session.quit()?;
//! ```

use crate::actions::MobileActions;
use crate::config::ProbeConfig;
use crate::driver::MobileDriver;
use crate::gestures::MobileGestures;
use crate::logging::LogSink;
use crate::platform::Platform;
use crate::result::{BankProbeError, ProbeResult};
use crate::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_VISIBILITY_TIMEOUT_MS, DEFAULT_WAIT_TIMEOUT_MS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const COMPONENT: &str = "Session";

/// Timing used by page objects bound to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Wait for element operations
    pub default_timeout: Duration,
    /// Wait for visibility checks
    pub visibility_timeout: Duration,
    /// Pause between lookups
    pub poll_interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            visibility_timeout: Duration::from_millis(DEFAULT_VISIBILITY_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl SessionSettings {
    /// Timing taken from configuration
    #[must_use]
    pub const fn from_config(config: &ProbeConfig) -> Self {
        Self {
            default_timeout: config.default_timeout(),
            visibility_timeout: config.visibility_timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Set the element wait
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the visibility wait
    #[must_use]
    pub const fn with_visibility_timeout(mut self, timeout: Duration) -> Self {
        self.visibility_timeout = timeout;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// One live driver session
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    driver: Box<dyn MobileDriver>,
    platform: Platform,
    settings: SessionSettings,
    sink: Arc<dyn LogSink>,
    closed: AtomicBool,
}

impl Session {
    /// Open a session on the configured Appium server
    ///
    /// # Errors
    ///
    /// `Transport` when the server refuses or cannot be reached.
    #[cfg(feature = "appium")]
    pub fn start(config: &ProbeConfig, sink: Arc<dyn LogSink>) -> ProbeResult<Self> {
        let capabilities = crate::capabilities::for_platform(config);
        sink.info(
            COMPONENT,
            &format!(
                "Launching {} driver on {}",
                config.platform, config.appium_server_url
            ),
        );
        let driver = crate::appium::AppiumDriver::connect(
            &config.appium_server_url,
            &capabilities,
            Duration::from_secs(config.command_timeout_secs),
        )
        .map_err(|e| {
            sink.error(COMPONENT, &format!("Failed to start session: {e}"));
            BankProbeError::transport("session start", e)
        })?;

        Ok(Self::with_driver(
            Box::new(driver),
            config.platform,
            SessionSettings::from_config(config),
            sink,
        ))
    }

    /// Wrap an already-open driver
    #[must_use]
    pub fn with_driver(
        driver: Box<dyn MobileDriver>,
        platform: Platform,
        settings: SessionSettings,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        let id = Uuid::new_v4();
        sink.debug(COMPONENT, &format!("Session {id} started for {platform}"));
        Self {
            id,
            driver,
            platform,
            settings,
            sink,
            closed: AtomicBool::new(false),
        }
    }

    /// Local id used to correlate log lines
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Active platform
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Timing settings
    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Underlying driver
    #[must_use]
    pub fn driver(&self) -> &dyn MobileDriver {
        self.driver.as_ref()
    }

    /// Log sink
    #[must_use]
    pub fn log(&self) -> &dyn LogSink {
        self.sink.as_ref()
    }

    /// Shared handle to the log sink
    #[must_use]
    pub fn sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.sink)
    }

    /// Action executor bound to this session
    #[must_use]
    pub fn actions(&self) -> MobileActions<'_> {
        MobileActions::new(self.driver(), self.log()).with_poll_interval(self.settings.poll_interval)
    }

    /// Gesture executor bound to this session
    #[must_use]
    pub fn gestures(&self) -> MobileGestures<'_> {
        MobileGestures::new(self.driver(), self.log())
    }

    /// True once the remote session has been ended
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// End the session now
    ///
    /// # Errors
    ///
    /// `Transport` when the server rejects the delete. The session counts as
    /// ended either way.
    pub fn quit(self) -> ProbeResult<()> {
        self.shutdown()
    }

    fn shutdown(&self) -> ProbeResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.sink
            .info(COMPONENT, &format!("Quitting driver session {}", self.id));
        self.driver
            .quit()
            .map_err(|e| BankProbeError::transport("session quit", e))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            self.sink
                .error(COMPONENT, &format!("Teardown failed: {e}"));
        }
    }
}
