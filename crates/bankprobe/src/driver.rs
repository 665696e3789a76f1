//! MobileDriver - the remote automation client contract
//!
//! The executors never talk to a device directly. Everything goes through
//! [`MobileDriver`], which is injected at session construction:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────────┐
//! │ Page object  │──►│ MobileActions /  │──►│ dyn MobileDriver     │
//! │              │   │ MobileGestures   │   │  AppiumDriver (HTTP) │
//! │              │   │                  │   │  MockDriver (tests)  │
//! └──────────────┘   └──────────────────┘   └──────────────────────┘
//! ```

use crate::gestures::GestureSequence;
use crate::locator::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for raw driver calls
pub type DriverResult<T> = Result<T, DriverError>;

/// Faults reported by the remote automation client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Connection or transport failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// Element reference no longer attached to the screen
    #[error("stale element reference")]
    StaleElement,

    /// Server answered with a protocol error
    #[error("{error} (HTTP {status}): {message}")]
    Protocol {
        /// HTTP status
        status: u16,
        /// W3C error code
        error: String,
        /// Server message
        message: String,
    },

    /// Session already ended
    #[error("session closed")]
    SessionClosed,
}

/// Opaque element reference issued by the driver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap a driver-issued id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw id string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live element resolved from a locator.
///
/// Handles are never cached: every action re-resolves its locator, since
/// screens re-render elements frequently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    id: ElementId,
    locator: Locator,
}

impl ElementHandle {
    /// Create a handle
    #[must_use]
    pub const fn new(id: ElementId, locator: Locator) -> Self {
        Self { id, locator }
    }

    /// Driver-issued id
    #[must_use]
    pub const fn id(&self) -> &ElementId {
        &self.id
    }

    /// Locator this handle was resolved from
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Current window size in device-independent points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Abstract remote automation client.
///
/// # Implementations
///
/// - `AppiumDriver` - HTTP client for an Appium server (feature `appium`)
/// - `MockDriver` - scripted in-memory screen for unit tests
pub trait MobileDriver: Send + Sync + fmt::Debug {
    /// Resolve a locator to at most one element, without waiting.
    ///
    /// `Ok(None)` means "not present right now"; errors are transport faults.
    fn find_element(&self, locator: &Locator) -> DriverResult<Option<ElementId>>;

    /// Click an element
    fn click(&self, element: &ElementId) -> DriverResult<()>;

    /// Clear an editable element
    fn clear(&self, element: &ElementId) -> DriverResult<()>;

    /// Type text into an element
    fn send_keys(&self, element: &ElementId, text: &str) -> DriverResult<()>;

    /// Displayed text of an element
    fn text(&self, element: &ElementId) -> DriverResult<String>;

    /// Attribute value of an element
    fn attribute(&self, element: &ElementId, name: &str) -> DriverResult<Option<String>>;

    /// Whether the element is displayed
    fn is_displayed(&self, element: &ElementId) -> DriverResult<bool>;

    /// Current viewport dimensions
    fn window_size(&self) -> DriverResult<Viewport>;

    /// Perform a pointer gesture sequence
    fn perform_gesture(&self, gesture: &GestureSequence) -> DriverResult<()>;

    /// Dismiss the on-screen keyboard
    fn hide_keyboard(&self) -> DriverResult<()>;

    /// End the remote session
    fn quit(&self) -> DriverResult<()>;
}
