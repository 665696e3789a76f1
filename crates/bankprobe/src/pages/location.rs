//! ATM finder ("ATM's NearMe" tab)

use super::app_id;
use crate::locator::Locator;
use crate::page_object::{PageContext, PageObject};
use crate::registry::LocatorRegistry;
use crate::result::ProbeResult;
use crate::session::Session;
use std::sync::OnceLock;

pub(crate) fn registry() -> &'static LocatorRegistry {
    static REGISTRY: OnceLock<LocatorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        LocatorRegistry::builder("LocationPage")
            .both(
                "nav_atm_near_me",
                Locator::android_uiautomator(
                    "new UiSelector().resourceId(\"xyz.digitalbank.demo:id/navigation_bar_item_labels_group\").instance(3)",
                ),
                Locator::accessibility_id("ATM's NearMe"),
            )
            .both(
                "btn_permission_allow",
                Locator::id("com.android.permissioncontroller:id/permission_allow_one_time_button"),
                Locator::accessibility_id("Allow Once"),
            )
            .both("checkbox_gps", app_id("checkbox1"), Locator::accessibility_id("GPS"))
            .both(
                "checkbox_network",
                app_id("checkbox2"),
                Locator::accessibility_id("Network"),
            )
            .both("checkbox_zip", app_id("checkbox3"), Locator::accessibility_id("ZIP"))
            .shared("btn_get_location", Locator::accessibility_id("Get Location"))
            .both(
                "txt_response",
                app_id("responseTextView"),
                Locator::accessibility_id("responseTextView"),
            )
            .both(
                "label_zip_search",
                app_id("atmSearchzip"),
                Locator::accessibility_id("Search by Zip Code"),
            )
            .build()
    })
}

/// ATM finder screen
#[derive(Debug, Clone, Copy)]
pub struct LocationPage<'s> {
    ctx: PageContext<'s>,
}

impl PageObject for LocationPage<'_> {
    fn registry(&self) -> &'static LocatorRegistry {
        registry()
    }
}

impl<'s> LocationPage<'s> {
    /// Bind to a session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            ctx: PageContext::new(session, registry()),
        }
    }

    /// Open the "ATM's NearMe" tab
    ///
    /// # Errors
    ///
    /// Tab missing or the click failed.
    pub fn open_atm_near_me_tab(&self) -> ProbeResult<()> {
        self.ctx.click("nav_atm_near_me")
    }

    /// Accept the location permission prompt if it is showing.
    ///
    /// Returns whether the prompt was there.
    ///
    /// # Errors
    ///
    /// Lookup faults, or the prompt was shown but the click failed.
    pub fn allow_permission(&self) -> ProbeResult<bool> {
        if !self.ctx.is_visible("btn_permission_allow")? {
            self.ctx.info("No location permission prompt");
            return Ok(false);
        }
        self.ctx.click("btn_permission_allow")?;
        self.ctx.info("Granted location permission");
        Ok(true)
    }

    /// Toggle the GPS option
    ///
    /// # Errors
    ///
    /// Checkbox missing or the click failed.
    pub fn toggle_gps_checkbox(&self) -> ProbeResult<()> {
        self.ctx.click("checkbox_gps")
    }

    /// Toggle the network option
    ///
    /// # Errors
    ///
    /// Checkbox missing or the click failed.
    pub fn toggle_network_checkbox(&self) -> ProbeResult<()> {
        self.ctx.click("checkbox_network")
    }

    /// Toggle the ZIP code option
    ///
    /// # Errors
    ///
    /// Checkbox missing or the click failed.
    pub fn toggle_zip_checkbox(&self) -> ProbeResult<()> {
        self.ctx.click("checkbox_zip")
    }

    /// Tap "Get Location"
    ///
    /// # Errors
    ///
    /// Button missing or the click failed.
    pub fn click_get_location(&self) -> ProbeResult<()> {
        self.ctx.click("btn_get_location")
    }

    /// Lookup result shown under the buttons
    ///
    /// # Errors
    ///
    /// Response view missing or unreadable.
    pub fn response_text(&self) -> ProbeResult<String> {
        self.ctx.read_text("txt_response")
    }

    /// Tap "Search by Zip Code"
    ///
    /// # Errors
    ///
    /// Label missing or the click failed.
    pub fn click_zip_label(&self) -> ProbeResult<()> {
        self.ctx.click("label_zip_search")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockElement;
    use crate::pages::test_support::session;
    use crate::platform::Platform;

    fn allow_once() -> Locator {
        Locator::accessibility_id("Allow Once")
    }

    #[test]
    fn test_permission_prompt_absent() {
        let (session, driver, _sink) = session(Platform::Ios);
        assert!(!LocationPage::new(&session).allow_permission().unwrap());
        assert_eq!(driver.clicks_on(&allow_once()), 0);
    }

    #[test]
    fn test_permission_prompt_present() {
        let (session, driver, _sink) = session(Platform::Ios);
        driver.add_element(allow_once(), MockElement::new());
        assert!(LocationPage::new(&session).allow_permission().unwrap());
        assert_eq!(driver.clicks_on(&allow_once()), 1);
    }

    #[test]
    fn test_gps_lookup_android() {
        let (session, driver, _sink) = session(Platform::Android);
        driver.add_element(
            Locator::android_uiautomator(
                "new UiSelector().resourceId(\"xyz.digitalbank.demo:id/navigation_bar_item_labels_group\").instance(3)",
            ),
            MockElement::new(),
        );
        driver.add_element(app_id("checkbox1"), MockElement::new());
        driver.add_element(Locator::accessibility_id("Get Location"), MockElement::new());
        driver.add_element(
            app_id("responseTextView"),
            MockElement::with_text("Nearest ATM: 0.4 mi"),
        );

        let page = LocationPage::new(&session);
        page.open_atm_near_me_tab().unwrap();
        page.toggle_gps_checkbox().unwrap();
        page.click_get_location().unwrap();
        assert_eq!(page.response_text().unwrap(), "Nearest ATM: 0.4 mi");
    }

    #[test]
    fn test_zip_controls_ios() {
        let (session, driver, _sink) = session(Platform::Ios);
        driver.add_element(Locator::accessibility_id("ZIP"), MockElement::new());
        driver.add_element(
            Locator::accessibility_id("Search by Zip Code"),
            MockElement::new(),
        );
        let page = LocationPage::new(&session);
        page.toggle_zip_checkbox().unwrap();
        page.click_zip_label().unwrap();
        assert!(page.toggle_network_checkbox().unwrap_err().is_not_found());
    }
}
