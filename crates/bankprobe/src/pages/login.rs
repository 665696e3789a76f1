//! Login screen

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
        LocatorRegistry::builder("LoginPage")
            .both(
                "email_field",
                app_id("emailInput"),
                Locator::accessibility_id("Enter UserName"),
            )
            .both(
                "password_field",
                app_id("passwordInput"),
                Locator::accessibility_id("Enter Password"),
            )
            .both("login_button", app_id("login"), Locator::accessibility_id("LogIn"))
            .both(
                "signup_link",
                app_id("registerTV"),
                Locator::accessibility_id("New User Registration"),
            )
            .both(
                "error_message",
                app_id("snackbar_text"),
                Locator::ios_predicate("label CONTAINS 'Invalid' OR label CONTAINS 'incorrect'"),
            )
            .both("login_menu", app_id("login"), Locator::accessibility_id("LogIn"))
            .both("logout_button", app_id("logout"), Locator::accessibility_id("Logout"))
            .build()
    })
}

/// Login screen
#[derive(Debug, Clone, Copy)]
pub struct LoginPage<'s> {
    ctx: PageContext<'s>,
}

impl PageObject for LoginPage<'_> {
    fn registry(&self) -> &'static LocatorRegistry {
        registry()
    }
}

impl<'s> LoginPage<'s> {
    /// Bind to a session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            ctx: PageContext::new(session, registry()),
        }
    }

    /// Type the email address
    ///
    /// # Errors
    ///
    /// Element missing or the driver rejected the input.
    pub fn enter_email(&self, email: &str) -> ProbeResult<()> {
        self.ctx.type_text("email_field", email)?;
        self.ctx.info(&format!("Entered email: {email}"));
        Ok(())
    }

    /// Type the password
    ///
    /// # Errors
    ///
    /// Element missing or the driver rejected the input.
    pub fn enter_password(&self, password: &str) -> ProbeResult<()> {
        self.ctx.type_text("password_field", password)?;
        self.ctx.info("Entered password");
        Ok(())
    }

    /// Tap "LogIn"
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn click_login_button(&self) -> ProbeResult<()> {
        self.ctx.click("login_button")?;
        self.ctx.info("Clicked Login button");
        Ok(())
    }

    /// Tap the registration link
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn click_signup_link(&self) -> ProbeResult<()> {
        self.ctx.click("signup_link")?;
        self.ctx.info("Clicked Sign Up link");
        Ok(())
    }

    /// Email, password, submit, then dismiss the keyboard
    ///
    /// # Errors
    ///
    /// The first failing step. A keyboard that is already hidden is not an
    /// error.
    pub fn login(&self, email: &str, password: &str) -> ProbeResult<()> {
        self.ctx
            .info(&format!("Attempting login with email: {email}"));
        self.enter_email(email)?;
        self.enter_password(password)?;
        self.click_login_button()?;
        // logged at warn by the executor
        let _ = self.ctx.session().actions().hide_keyboard();
        self.ctx.info("Login flow completed");
        Ok(())
    }

    /// Whether the login error banner is shown
    ///
    /// # Errors
    ///
    /// Lookup faults; a missing banner is `Ok(false)`.
    pub fn is_error_displayed(&self) -> ProbeResult<bool> {
        let visible = self.ctx.is_visible("error_message")?;
        self.ctx
            .info(&format!("Error message displayed: {visible}"));
        Ok(visible)
    }

    /// Text of the login error banner, `None` when none is shown
    ///
    /// # Errors
    ///
    /// Lookup or read faults.
    pub fn error_message(&self) -> ProbeResult<Option<String>> {
        let message = self.ctx.read_text_if_present("error_message")?;
        match &message {
            Some(text) => self.ctx.info(&format!("Error message text: {text}")),
            None => self.ctx.warn("No error message text found"),
        }
        Ok(message)
    }

    /// Go back to the login screen
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn navigate_to_login(&self) -> ProbeResult<()> {
        self.ctx.click("login_menu")?;
        self.ctx.info("Navigated to login screen");
        Ok(())
    }

    /// Log out; `true` when the login menu is visible afterwards
    ///
    /// # Errors
    ///
    /// Logout button missing or the click failed.
    pub fn logout(&self) -> ProbeResult<bool> {
        self.ctx.click("logout_button")?;
        self.ctx.info("Clicked Logout button");
        let back = self.ctx.is_visible("login_menu")?;
        self.ctx
            .info(&format!("Login menu visible after logout: {back}"));
        Ok(back)
    }
}
