//! Action executor
//!
//! [`MobileActions`] turns a [`Locator`] into a driver interaction: wait for
//! the element, act on it, log the outcome. Every failure is logged with the
//! locator and re-raised; nothing here retries.
//!
//! `is_visible` is the single exception to "absence is fatal": it answers
//! `false` when the element never shows up, so tests can assert that
//! something is *not* on screen.

use crate::driver::{DriverError, ElementHandle, MobileDriver};
use crate::locator::Locator;
use crate::logging::LogSink;
use crate::result::{BankProbeError, ProbeResult};
use crate::wait::{poll_until, WaitOptions, DEFAULT_POLL_INTERVAL_MS};
use std::time::Duration;

const COMPONENT: &str = "MobileActions";

/// Element interactions against a driver
#[derive(Debug, Clone, Copy)]
pub struct MobileActions<'a> {
    driver: &'a dyn MobileDriver,
    log: &'a dyn LogSink,
    poll_interval: Duration,
}

impl<'a> MobileActions<'a> {
    /// Bind to a driver and sink, polling every 500ms
    #[must_use]
    pub const fn new(driver: &'a dyn MobileDriver, log: &'a dyn LogSink) -> Self {
        Self {
            driver,
            log,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set the pause between lookups
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Pause between lookups
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait up to `timeout` for the element to be present.
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when the wait elapses, `Transport` when a lookup
    /// itself fails.
    pub fn find(&self, locator: &Locator, timeout: Duration) -> ProbeResult<ElementHandle> {
        self.locate(locator, timeout)?.ok_or_else(|| {
            self.log
                .error(COMPONENT, &format!("Element not found: {locator}"));
            BankProbeError::ElementNotFound {
                locator: locator.clone(),
                timeout_ms: timeout.as_millis() as u64,
            }
        })
    }

    /// Poll for the element; `None` when the wait elapses
    fn locate(&self, locator: &Locator, timeout: Duration) -> ProbeResult<Option<ElementHandle>> {
        self.log
            .debug(COMPONENT, &format!("Finding element: {locator}"));

        let options = WaitOptions::new()
            .with_timeout(timeout)
            .with_poll_interval(self.poll_interval);
        let polled = poll_until(&options, || self.driver.find_element(locator)).map_err(|e| {
            self.log
                .error(COMPONENT, &format!("Lookup failed for {locator}: {e}"));
            BankProbeError::transport(format!("lookup of {locator}"), e)
        })?;

        Ok(polled
            .value
            .map(|id| ElementHandle::new(id, locator.clone())))
    }

    /// Find then click
    ///
    /// # Errors
    ///
    /// `ElementNotFound`, `Transport`, or `Interaction` when the click fails.
    pub fn click(&self, locator: &Locator, timeout: Duration) -> ProbeResult<()> {
        let handle = self.found("click", locator, timeout)?;
        self.driver
            .click(handle.id())
            .map_err(|e| self.interaction("click", locator, e))?;
        self.log
            .info(COMPONENT, &format!("Clicked element: {locator}"));
        Ok(())
    }

    /// Find, clear, then type `text`.
    ///
    /// Empty text still clears the field and still sends (zero characters).
    ///
    /// # Errors
    ///
    /// `ElementNotFound`, `Transport`, or `Interaction` when clear/send fails.
    pub fn type_text(&self, locator: &Locator, text: &str, timeout: Duration) -> ProbeResult<()> {
        let handle = self.found("send keys to", locator, timeout)?;
        self.driver
            .clear(handle.id())
            .map_err(|e| self.interaction("clear", locator, e))?;
        self.driver
            .send_keys(handle.id(), text)
            .map_err(|e| self.interaction("send keys to", locator, e))?;
        self.log.info(
            COMPONENT,
            &format!(
                "Sent keys ({} chars) to element: {locator}",
                text.chars().count()
            ),
        );
        Ok(())
    }

    /// Displayed text; an empty string is a valid result
    ///
    /// # Errors
    ///
    /// `ElementNotFound`, `Transport`, or `Interaction` when the read fails.
    pub fn read_text(&self, locator: &Locator, timeout: Duration) -> ProbeResult<String> {
        let handle = self.found("get text from", locator, timeout)?;
        let text = self
            .driver
            .text(handle.id())
            .map_err(|e| self.interaction("get text from", locator, e))?;
        self.log.info(
            COMPONENT,
            &format!("Retrieved text from element {locator}: '{text}'"),
        );
        Ok(text)
    }

    /// Attribute value, `None` when the element lacks it
    ///
    /// # Errors
    ///
    /// `ElementNotFound`, `Transport`, or `Interaction` when the read fails.
    pub fn read_attribute(
        &self,
        locator: &Locator,
        name: &str,
        timeout: Duration,
    ) -> ProbeResult<Option<String>> {
        let handle = self.found("read attribute of", locator, timeout)?;
        let value = self
            .driver
            .attribute(handle.id(), name)
            .map_err(|e| self.interaction("read attribute of", locator, e))?;
        self.log.info(
            COMPONENT,
            &format!("Retrieved attribute '{name}' from element {locator}: {value:?}"),
        );
        Ok(value)
    }

    /// Whether the element is on screen.
    ///
    /// Absence within `timeout` is `Ok(false)`, as is an element that went
    /// stale between lookup and query. Present elements answer with the
    /// driver's displayed flag.
    ///
    /// # Errors
    ///
    /// `Transport` when a lookup fails, `Interaction` when the displayed query
    /// fails for any reason other than staleness.
    pub fn is_visible(&self, locator: &Locator, timeout: Duration) -> ProbeResult<bool> {
        let Some(handle) = self.locate(locator, timeout)? else {
            self.log
                .debug(COMPONENT, &format!("Element not visible: {locator}"));
            return Ok(false);
        };

        match self.driver.is_displayed(handle.id()) {
            Ok(displayed) => {
                self.log.debug(
                    COMPONENT,
                    &format!("Element {locator} displayed: {displayed}"),
                );
                Ok(displayed)
            }
            Err(DriverError::StaleElement) => {
                self.log
                    .debug(COMPONENT, &format!("Element went stale: {locator}"));
                Ok(false)
            }
            Err(e) => Err(self.interaction("check visibility of", locator, e)),
        }
    }

    /// Dismiss the on-screen keyboard
    ///
    /// # Errors
    ///
    /// `Transport` when the driver refuses, typically because no keyboard is
    /// shown.
    pub fn hide_keyboard(&self) -> ProbeResult<()> {
        self.driver.hide_keyboard().map_err(|e| {
            self.log
                .warn(COMPONENT, &format!("Could not hide keyboard: {e}"));
            BankProbeError::transport("hide keyboard", e)
        })?;
        self.log.debug(COMPONENT, "Keyboard hidden");
        Ok(())
    }

    fn found(&self, action: &str, locator: &Locator, timeout: Duration) -> ProbeResult<ElementHandle> {
        self.find(locator, timeout).map_err(|e| {
            self.log
                .error(COMPONENT, &format!("Failed to {action} element {locator}: {e}"));
            e
        })
    }

    fn interaction(&self, action: &'static str, locator: &Locator, source: DriverError) -> BankProbeError {
        self.log.error(
            COMPONENT,
            &format!("Failed to {action} element {locator}: {source}"),
        );
        BankProbeError::Interaction {
            action,
            locator: locator.clone(),
            source,
        }
    }
}
