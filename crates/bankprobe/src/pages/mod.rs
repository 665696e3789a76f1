//! Digital Bank screens
//!
//! One page object per screen. Locator tables are built once, on first use,
//! and shared by every page instance.

mod account_summary;
mod atm;
mod deposit;
mod location;
mod login;
mod sign_up;

pub use account_summary::{AccountSummaryPage, TransactionRow};
pub use atm::AtmPage;
pub use deposit::DepositPage;
pub use location::LocationPage;
pub use login::LoginPage;
pub use sign_up::SignUpPage;

use crate::registry::LocatorRegistry;
use crate::result::{BankProbeError, ProbeResult};
use std::fmt;
use std::str::FromStr;

/// Prefix of every Digital Bank Android resource id
pub(crate) const APP_ID: &str = "xyz.digitalbank.demo:id/";

/// Android resource id inside the app package
pub(crate) fn app_id(name: &str) -> crate::locator::Locator {
    crate::locator::Locator::id(format!("{APP_ID}{name}"))
}

/// Screens with a locator table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Login screen
    Login,
    /// Registration form
    SignUp,
    /// Deposit form
    Deposit,
    /// ATM settings
    Atm,
    /// ATM finder
    Location,
    /// Account summary
    AccountSummary,
}

impl PageKind {
    /// Every screen
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::SignUp,
        Self::Deposit,
        Self::Atm,
        Self::Location,
        Self::AccountSummary,
    ];

    /// Command-line name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::SignUp => "sign-up",
            Self::Deposit => "deposit",
            Self::Atm => "atm",
            Self::Location => "location",
            Self::AccountSummary => "account-summary",
        }
    }

    /// Locator table of the screen
    #[must_use]
    pub fn registry(&self) -> &'static LocatorRegistry {
        match self {
            Self::Login => login::registry(),
            Self::SignUp => sign_up::registry(),
            Self::Deposit => deposit::registry(),
            Self::Atm => atm::registry(),
            Self::Location => location::registry(),
            Self::AccountSummary => account_summary::registry(),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = BankProbeError;

    fn from_str(s: &str) -> ProbeResult<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(PageKind::as_str).collect();
                BankProbeError::configuration(format!(
                    "unknown page '{s}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::logging::MemorySink;
    use crate::mock::MockDriver;
    use crate::platform::Platform;
    use crate::session::{Session, SessionSettings};
    use std::sync::Arc;
    use std::time::Duration;

    /// Session on a mock driver with short waits
    pub(crate) fn session(platform: Platform) -> (Session, MockDriver, Arc<MemorySink>) {
        let driver = MockDriver::new();
        let sink = Arc::new(MemorySink::new());
        let settings = SessionSettings::default()
            .with_default_timeout(Duration::from_millis(20))
            .with_visibility_timeout(Duration::from_millis(10))
            .with_poll_interval(Duration::from_millis(1));
        let session = Session::with_driver(
            Box::new(driver.clone()),
            platform,
            settings,
            sink.clone(),
        );
        (session, driver, sink)
    }
}
