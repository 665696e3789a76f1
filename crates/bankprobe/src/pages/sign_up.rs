//! Registration form

use crate::locator::Locator;
use crate::page_object::{PageContext, PageObject};
use crate::platform::Platform;
use crate::registry::LocatorRegistry;
use crate::result::ProbeResult;
use crate::session::Session;
use std::sync::OnceLock;

pub(crate) fn registry() -> &'static LocatorRegistry {
    static REGISTRY: OnceLock<LocatorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        LocatorRegistry::builder("SignUpPage")
            .shared("sign_up_here", Locator::accessibility_id("Sign Up Here"))
            .shared("first_name", Locator::accessibility_id("First Name"))
            .shared("last_name", Locator::accessibility_id("Last Name"))
            .shared("email", Locator::accessibility_id("Email Address"))
            .shared("password", Locator::accessibility_id("Password"))
            .shared("submit", Locator::accessibility_id("Create a new account"))
            .both(
                "success_message",
                Locator::xpath("//android.widget.Toast[@text='Account created successfully']"),
                Locator::ios_predicate("label CONTAINS 'Account created'"),
            )
            .both(
                "error_message",
                Locator::xpath("//android.widget.Toast[contains(@text,'Error')]"),
                Locator::ios_predicate("label CONTAINS 'Error'"),
            )
            .build()
    })
}

/// Registration form
#[derive(Debug, Clone, Copy)]
pub struct SignUpPage<'s> {
    ctx: PageContext<'s>,
}

impl PageObject for SignUpPage<'_> {
    fn registry(&self) -> &'static LocatorRegistry {
        registry()
    }
}

impl<'s> SignUpPage<'s> {
    /// Bind to a session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            ctx: PageContext::new(session, registry()),
        }
    }

    /// Open the form from the login screen
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn tap_sign_up_here(&self) -> ProbeResult<()> {
        self.ctx.click("sign_up_here")?;
        self.ctx.info("Navigated to Sign-Up page");
        Ok(())
    }

    /// Type the first name
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_first_name(&self, first_name: &str) -> ProbeResult<()> {
        self.ctx.type_text("first_name", first_name)?;
        self.ctx.info(&format!("Entered First Name: {first_name}"));
        Ok(())
    }

    /// Type the last name
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_last_name(&self, last_name: &str) -> ProbeResult<()> {
        self.ctx.type_text("last_name", last_name)?;
        self.ctx.info(&format!("Entered Last Name: {last_name}"));
        Ok(())
    }

    /// Type the email address
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_email(&self, email: &str) -> ProbeResult<()> {
        self.ctx.type_text("email", email)?;
        self.ctx.info(&format!("Entered Email: {email}"));
        Ok(())
    }

    /// Type the password
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_password(&self, password: &str) -> ProbeResult<()> {
        self.ctx.type_text("password", password)?;
        self.ctx.info("Entered Password");
        Ok(())
    }

    /// Tap "Create a new account"
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn submit_form(&self) -> ProbeResult<()> {
        self.ctx.click("submit")?;
        self.ctx.info("Submitted Sign-Up form");
        Ok(())
    }

    /// Success toast text, `None` when no toast is shown
    ///
    /// # Errors
    ///
    /// Lookup or read faults.
    pub fn success_message(&self) -> ProbeResult<Option<String>> {
        self.message("success_message")
    }

    /// Error toast text, `None` when no toast is shown
    ///
    /// # Errors
    ///
    /// Lookup or read faults.
    pub fn error_message(&self) -> ProbeResult<Option<String>> {
        self.message("error_message")
    }

    /// Whether the registration form is on screen
    ///
    /// # Errors
    ///
    /// Lookup faults.
    pub fn is_form_displayed(&self) -> ProbeResult<bool> {
        self.ctx.is_visible("first_name")
    }

    /// Android toasts expose their text through the `text` attribute
    fn message(&self, name: &str) -> ProbeResult<Option<String>> {
        if !self.ctx.is_visible(name)? {
            return Ok(None);
        }
        let text = match self.ctx.platform() {
            Platform::Android => self.ctx.read_attribute(name, "text")?,
            Platform::Ios => Some(self.ctx.read_text(name)?),
        };
        if let Some(text) = &text {
            self.ctx.info(&format!("Toast: {text}"));
        }
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockElement;
    use crate::pages::test_support::session;

    #[test]
    fn test_fill_and_submit() {
        let (session, driver, _sink) = session(Platform::Android);
        for label in [
            "First Name",
            "Last Name",
            "Email Address",
            "Password",
            "Create a new account",
        ] {
            driver.add_element(Locator::accessibility_id(label), MockElement::new());
        }
        let page = SignUpPage::new(&session);
        page.enter_first_name("Josh").unwrap();
        page.enter_last_name("Smith").unwrap();
        page.enter_email("josh@example.com").unwrap();
        page.enter_password("S3cret!").unwrap();
        page.submit_form().unwrap();

        assert_eq!(
            driver
                .typed_text(&Locator::accessibility_id("Last Name"))
                .as_deref(),
            Some("Smith")
        );
        assert_eq!(
            driver.clicks_on(&Locator::accessibility_id("Create a new account")),
            1
        );
    }

    #[test]
    fn test_android_success_toast_reads_text_attribute() {
        let (session, driver, _sink) = session(Platform::Android);
        driver.add_element(
            Locator::xpath("//android.widget.Toast[@text='Account created successfully']"),
            MockElement::new().attribute("text", "Account created successfully"),
        );
        let page = SignUpPage::new(&session);
        assert_eq!(
            page.success_message().unwrap().as_deref(),
            Some("Account created successfully")
        );
        assert_eq!(page.error_message().unwrap(), None);
    }

    #[test]
    fn test_ios_error_label() {
        let (session, driver, _sink) = session(Platform::Ios);
        driver.add_element(
            Locator::ios_predicate("label CONTAINS 'Error'"),
            MockElement::with_text("Error: email already registered"),
        );
        assert_eq!(
            SignUpPage::new(&session).error_message().unwrap().as_deref(),
            Some("Error: email already registered")
        );
    }

    #[test]
    fn test_form_visibility() {
        let (session, driver, _sink) = session(Platform::Ios);
        let page = SignUpPage::new(&session);
        assert!(!page.is_form_displayed().unwrap());
        driver.add_element(Locator::accessibility_id("First Name"), MockElement::new());
        assert!(page.is_form_displayed().unwrap());
    }
}
