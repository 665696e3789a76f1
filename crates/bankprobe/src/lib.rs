//! Bankprobe: page-object test automation for the Digital Bank mobile app
//!
//! Page objects describe each screen of the app by symbolic element names.
//! A name resolves to a platform-specific locator, and the action executor
//! drives a remote Appium session with it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    BANKPROBE Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Page       │    │ Locator    │    │ Actions /  │            │
//! │   │ Object     │───►│ Registry   │───►│ Gestures   │───► driver │
//! │   │            │    │ (platform) │    │ (poll)     │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use bankprobe::prelude::*;
//!
//! let config = ProbeConfig::load(None)?;
//! let session = Session::start(&config, TracingSink::shared())?;
//! let login = LoginPage::new(&session);
//! login.login(&config.credentials.username, &config.credentials.password)?;
//! assert!(!login.is_error_displayed()?);
//! session.quit()?;
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod actions;
#[cfg(feature = "appium")]
mod appium;
pub mod capabilities;
mod config;
mod driver;
mod gestures;
mod locator;
pub mod logging;
mod page_object;
mod platform;
mod registry;
mod result;
mod session;
pub mod wait;

/// Scripted in-memory driver for page-object tests
///
/// Drive page objects without a device and assert on the calls they made.
pub mod mock;

/// Digital Bank screens
pub mod pages;

pub use actions::MobileActions;
#[cfg(feature = "appium")]
pub use appium::AppiumDriver;
pub use config::{env, AndroidDevice, Credentials, IosDevice, ProbeConfig, REDACTED};
pub use driver::{DriverError, DriverResult, ElementHandle, ElementId, MobileDriver, Viewport};
pub use gestures::{
    swipe_plan, Direction, GestureSequence, MobileGestures, Point, PointerAction, SwipePlan,
    DEFAULT_LONG_PRESS_DURATION, DEFAULT_SWIPE_DURATION,
};
pub use locator::{Locator, Strategy};
pub use logging::{LogRecord, LogSink, LoggingConfig, MemorySink, TracingSink};
pub use page_object::{PageContext, PageObject};
pub use platform::{resolve_for, Platform, PlatformLocator};
pub use registry::{LocatorRegistry, LocatorRegistryBuilder};
pub use result::{BankProbeError, ProbeResult};
pub use session::{Session, SessionSettings};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::gestures::*;
    pub use super::locator::*;
    pub use super::logging::{LogSink, LoggingConfig, MemorySink, TracingSink};
    pub use super::page_object::*;
    pub use super::pages::*;
    pub use super::platform::*;
    pub use super::registry::*;
    pub use super::result::*;
    pub use super::session::*;
    #[cfg(feature = "appium")]
    pub use super::AppiumDriver;
}
