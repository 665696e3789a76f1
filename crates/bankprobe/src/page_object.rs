//! Page Object Model support
//!
//! A page object pairs a static [`LocatorRegistry`] with a [`Session`]. Page
//! methods speak in symbolic element names; [`PageContext`] resolves each
//! name for the session's platform and hands the locator to the action
//! executor with the session's timeouts.
//!
//! # Example
//!
//! ```ignore
//! struct BalancePage<'s> {
//!     ctx: PageContext<'s>,
//! }
//!
//! impl PageObject for BalancePage<'_> {
//!     fn registry(&self) -> &'static LocatorRegistry {
//!         self.ctx.registry()
//!     }
//! }
//!
//! impl BalancePage<'_> {
//!     pub fn balance(&self) -> ProbeResult<String> {
//!         self.ctx.read_text("balance")
//!     }
//! }
//! ```

use crate::locator::Locator;
use crate::platform::Platform;
use crate::registry::LocatorRegistry;
use crate::result::ProbeResult;
use crate::session::Session;

/// A screen of the application under test
pub trait PageObject {
    /// Locator table for this screen
    fn registry(&self) -> &'static LocatorRegistry;

    /// Name used in logs and errors
    fn page_name(&self) -> &'static str {
        self.registry().page()
    }

    /// Symbolic names available on `platform`
    fn element_names(&self, platform: Platform) -> Vec<&'static str> {
        self.registry().names(platform)
    }
}

/// Name-based element operations for one page on one session
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'s> {
    session: &'s Session,
    registry: &'static LocatorRegistry,
}

impl<'s> PageContext<'s> {
    /// Bind a registry to a session
    #[must_use]
    pub const fn new(session: &'s Session, registry: &'static LocatorRegistry) -> Self {
        Self { session, registry }
    }

    /// Bound session
    #[must_use]
    pub const fn session(&self) -> &'s Session {
        self.session
    }

    /// Bound registry
    #[must_use]
    pub const fn registry(&self) -> &'static LocatorRegistry {
        self.registry
    }

    /// Active platform
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.session.platform()
    }

    /// Log at info level under the page name
    pub fn info(&self, message: &str) {
        self.session.log().info(self.registry.page(), message);
    }

    /// Log at warn level under the page name
    pub fn warn(&self, message: &str) {
        self.session.log().warn(self.registry.page(), message);
    }

    /// Resolve a symbolic name for the active platform
    ///
    /// # Errors
    ///
    /// `UnknownElement` when the name is absent on this platform.
    pub fn locator(&self, name: &str) -> ProbeResult<&'static Locator> {
        self.registry.resolve(self.platform(), name).map_err(|e| {
            self.session.log().error(self.registry.page(), &e.to_string());
            e
        })
    }

    /// Click the named element
    ///
    /// # Errors
    ///
    /// See [`crate::MobileActions::click`].
    pub fn click(&self, name: &str) -> ProbeResult<()> {
        self.click_locator(self.locator(name)?)
    }

    /// Clear the named field and type into it
    ///
    /// # Errors
    ///
    /// See [`crate::MobileActions::type_text`].
    pub fn type_text(&self, name: &str, text: &str) -> ProbeResult<()> {
        self.type_locator(self.locator(name)?, text)
    }

    /// Text of the named element
    ///
    /// # Errors
    ///
    /// See [`crate::MobileActions::read_text`].
    pub fn read_text(&self, name: &str) -> ProbeResult<String> {
        self.session
            .actions()
            .read_text(self.locator(name)?, self.timeout())
    }

    /// Attribute of the named element
    ///
    /// # Errors
    ///
    /// See [`crate::MobileActions::read_attribute`].
    pub fn read_attribute(&self, name: &str, attribute: &str) -> ProbeResult<Option<String>> {
        self.session
            .actions()
            .read_attribute(self.locator(name)?, attribute, self.timeout())
    }

    /// Text of the named element, `None` when it is not on screen
    ///
    /// # Errors
    ///
    /// Lookup faults; absence is not an error.
    pub fn read_text_if_present(&self, name: &str) -> ProbeResult<Option<String>> {
        if self.is_visible(name)? {
            self.read_text(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Whether the named element is on screen, within the visibility wait
    ///
    /// # Errors
    ///
    /// `UnknownElement` or lookup faults; absence is `Ok(false)`.
    pub fn is_visible(&self, name: &str) -> ProbeResult<bool> {
        self.is_locator_visible(self.locator(name)?)
    }

    /// Click an ad-hoc locator
    ///
    /// # Errors
    ///
    /// See [`crate::MobileActions::click`].
    pub fn click_locator(&self, locator: &Locator) -> ProbeResult<()> {
        self.session.actions().click(locator, self.timeout())
    }

    /// Type into an ad-hoc locator
    ///
    /// # Errors
    ///
    /// See [`crate::MobileActions::type_text`].
    pub fn type_locator(&self, locator: &Locator, text: &str) -> ProbeResult<()> {
        self.session
            .actions()
            .type_text(locator, text, self.timeout())
    }

    /// Visibility of an ad-hoc locator
    ///
    /// # Errors
    ///
    /// Lookup faults; absence is `Ok(false)`.
    pub fn is_locator_visible(&self, locator: &Locator) -> ProbeResult<bool> {
        self.session
            .actions()
            .is_visible(locator, self.session.settings().visibility_timeout)
    }

    fn timeout(&self) -> std::time::Duration {
        self.session.settings().default_timeout
    }
}
