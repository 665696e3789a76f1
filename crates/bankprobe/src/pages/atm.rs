//! ATM settings (iOS)

use crate::locator::Locator;
use crate::page_object::{PageContext, PageObject};
use crate::registry::LocatorRegistry;
use crate::result::ProbeResult;
use crate::session::Session;
use std::sync::OnceLock;

const ZIP_CODE_FIELD: &str = concat!(
    "**/XCUIElementTypeAlert[`name == \"Enter Zip Code\"`]",
    "/XCUIElementTypeOther/XCUIElementTypeOther/XCUIElementTypeOther[2]",
    "/XCUIElementTypeScrollView[1]/XCUIElementTypeOther[1]/XCUIElementTypeOther",
    "/XCUIElementTypeOther/XCUIElementTypeCollectionView/XCUIElementTypeCell",
    "/XCUIElementTypeOther/XCUIElementTypeOther/XCUIElementTypeOther/XCUIElementTypeOther[2]",
);

pub(crate) fn registry() -> &'static LocatorRegistry {
    static REGISTRY: OnceLock<LocatorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        LocatorRegistry::builder("AtmPage")
            .ios(
                "switch_on",
                Locator::ios_class_chain("**/XCUIElementTypeSwitch[`value == \"1\"`]"),
            )
            .ios(
                "switch_off_first",
                Locator::ios_class_chain("**/XCUIElementTypeSwitch[`value == \"0\"`][1]"),
            )
            .ios(
                "switch_off_second",
                Locator::ios_class_chain("**/XCUIElementTypeSwitch[`value == \"0\"`][2]"),
            )
            .ios("get_location_button", Locator::ios_static_text("Get Location", 1))
            .ios("zip_code_field", Locator::ios_class_chain(ZIP_CODE_FIELD))
            .ios("ok_button", Locator::accessibility_id("OK"))
            .build()
    })
}

/// ATM settings screen
#[derive(Debug, Clone, Copy)]
pub struct AtmPage<'s> {
    ctx: PageContext<'s>,
}

impl PageObject for AtmPage<'_> {
    fn registry(&self) -> &'static LocatorRegistry {
        registry()
    }
}

impl<'s> AtmPage<'s> {
    /// Bind to a session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            ctx: PageContext::new(session, registry()),
        }
    }

    /// Tap the switch that is currently on
    ///
    /// # Errors
    ///
    /// Switch missing or the click failed.
    pub fn toggle_switch_on(&self) -> ProbeResult<()> {
        self.ctx.info("Toggling ON switch");
        self.ctx.click("switch_on")
    }

    /// Tap the first switch that is currently off
    ///
    /// # Errors
    ///
    /// Switch missing or the click failed.
    pub fn toggle_switch_off_first(&self) -> ProbeResult<()> {
        self.ctx.info("Toggling first OFF switch");
        self.ctx.click("switch_off_first")
    }

    /// Tap the second switch that is currently off
    ///
    /// # Errors
    ///
    /// Switch missing or the click failed.
    pub fn toggle_switch_off_second(&self) -> ProbeResult<()> {
        self.ctx.info("Toggling second OFF switch");
        self.ctx.click("switch_off_second")
    }

    /// Scroll the button into view, then tap it
    ///
    /// # Errors
    ///
    /// Swipe failure, or the button is missing.
    pub fn click_get_location(&self) -> ProbeResult<()> {
        self.ctx.info("Clicking Get Location button");
        self.ctx.session().gestures().swipe_up()?;
        self.ctx.click("get_location_button")
    }

    /// Type into the zip code alert
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_zip_code(&self, zip_code: &str) -> ProbeResult<()> {
        self.ctx.info(&format!("Entering Zip Code: {zip_code}"));
        self.ctx.type_text("zip_code_field", zip_code)
    }

    /// Confirm the ZIP code dialog
    ///
    /// # Errors
    ///
    /// Button missing or the click failed.
    pub fn click_ok(&self) -> ProbeResult<()> {
        self.ctx.info("Clicking OK button");
        self.ctx.click("ok_button")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::gestures::PointerAction;
    use crate::mock::{DriverCall, MockElement};
    use crate::pages::test_support::session;
    use crate::platform::Platform;
    use crate::result::BankProbeError;

    #[test]
    fn test_get_location_swipes_before_click() {
        let (session, driver, _sink) = session(Platform::Ios);
        let button = Locator::ios_class_chain(
            "**/XCUIElementTypeStaticText[`name == \"Get Location\"`][1]",
        );
        driver.add_element(button.clone(), MockElement::new());

        AtmPage::new(&session).click_get_location().unwrap();

        let calls = driver.calls();
        let swipe = calls
            .iter()
            .position(|c| *c == DriverCall::Gesture("swipe"))
            .unwrap();
        let click = calls
            .iter()
            .position(|c| *c == DriverCall::Click(button.clone()))
            .unwrap();
        assert!(swipe < click);

        // default mock window is 1080x2340
        let gesture = &driver.gestures()[0];
        assert_eq!(
            gesture.actions[0],
            PointerAction::PointerMove {
                x: 540,
                y: 1872,
                duration: 0
            }
        );
    }

    #[test]
    fn test_zip_code_and_ok() {
        let (session, driver, _sink) = session(Platform::Ios);
        driver.add_element(Locator::ios_class_chain(ZIP_CODE_FIELD), MockElement::new());
        driver.add_element(Locator::accessibility_id("OK"), MockElement::new());
        let page = AtmPage::new(&session);
        page.enter_zip_code("10001").unwrap();
        page.click_ok().unwrap();
        assert_eq!(
            driver
                .typed_text(&Locator::ios_class_chain(ZIP_CODE_FIELD))
                .as_deref(),
            Some("10001")
        );
    }

    #[test]
    fn test_off_switches_are_distinct() {
        let first = registry().resolve(Platform::Ios, "switch_off_first").unwrap();
        let second = registry().resolve(Platform::Ios, "switch_off_second").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_android_is_unknown_element() {
        let (session, _driver, _sink) = session(Platform::Android);
        let err = AtmPage::new(&session).toggle_switch_on().unwrap_err();
        assert!(matches!(
            err,
            BankProbeError::UnknownElement { ref name, .. } if name == "switch_on"
        ));
    }
}
