//! Wait mechanisms
//!
//! The bounded poll-until-present loop behind `MobileActions::find`. It is the
//! only place the executor suspends; there is no fixed sleep elsewhere.

use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for element lookups (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default timeout for visibility checks (3 seconds)
pub const DEFAULT_VISIBILITY_TIMEOUT_MS: u64 = 3_000;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Upper bound on the whole wait
    pub timeout: Duration,
    /// Pause between attempts
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Timeout in whole milliseconds
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Outcome of a finished poll loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polled<T> {
    /// Value produced by the check, `None` on timeout
    pub value: Option<T>,
    /// Number of check calls made
    pub attempts: u32,
    /// Time spent in the loop
    pub elapsed: Duration,
}

impl<T> Polled<T> {
    /// True when the loop gave up
    pub const fn timed_out(&self) -> bool {
        self.value.is_none()
    }
}

/// Call `check` until it yields a value or `options.timeout` elapses.
///
/// The check always runs at least once, even with a zero timeout. A check
/// error ends the loop immediately and is returned as-is.
pub fn poll_until<T, E, F>(options: &WaitOptions, mut check: F) -> Result<Polled<T>, E>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        if let Some(value) = check()? {
            return Ok(Polled {
                value: Some(value),
                attempts,
                elapsed: start.elapsed(),
            });
        }

        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            return Ok(Polled {
                value: None,
                attempts,
                elapsed,
            });
        }

        let remaining = options.timeout - elapsed;
        std::thread::sleep(options.poll_interval.min(remaining));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn fast(timeout_ms: u64) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_poll_interval(Duration::from_millis(1))
    }

    mod options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms(), DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(
                opts.poll_interval,
                Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
            );
        }

        #[test]
        fn test_builders() {
            let opts = WaitOptions::new()
                .with_timeout(Duration::from_secs(2))
                .with_poll_interval(Duration::from_millis(20));
            assert_eq!(opts.timeout_ms(), 2000);
            assert_eq!(opts.poll_interval, Duration::from_millis(20));
        }
    }

    mod poll_tests {
        use super::*;

        #[test]
        fn test_immediate_success() {
            let polled: Polled<u32> =
                poll_until(&fast(100), || Ok::<_, ()>(Some(7))).unwrap();
            assert_eq!(polled.value, Some(7));
            assert_eq!(polled.attempts, 1);
        }

        #[test]
        fn test_success_after_retries() {
            let mut calls = 0;
            let polled = poll_until(&fast(1_000), || {
                calls += 1;
                Ok::<_, ()>((calls >= 3).then_some("ready"))
            })
            .unwrap();
            assert_eq!(polled.value, Some("ready"));
            assert_eq!(polled.attempts, 3);
        }

        #[test]
        fn test_timeout_returns_none() {
            let polled: Polled<()> = poll_until(&fast(15), || Ok::<_, ()>(None)).unwrap();
            assert!(polled.timed_out());
            assert!(polled.attempts >= 1);
            assert!(polled.elapsed >= Duration::from_millis(15));
        }

        #[test]
        fn test_zero_timeout_probes_once() {
            let polled: Polled<()> = poll_until(&fast(0), || Ok::<_, ()>(None)).unwrap();
            assert!(polled.timed_out());
            assert_eq!(polled.attempts, 1);
        }

        #[test]
        fn test_probe_error_stops_loop() {
            let mut calls = 0;
            let result: Result<Polled<()>, &str> = poll_until(&fast(1_000), || {
                calls += 1;
                Err("transport down")
            });
            assert_eq!(result.unwrap_err(), "transport down");
            assert_eq!(calls, 1);
        }
    }
}
