//! Deposit form (Android)

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
        LocatorRegistry::builder("DepositPage")
            .android("login_button", app_id("login_button"))
            .android("dashboard_tab", Locator::android_text("Dashboard"))
            .android("deposit_tab", Locator::android_text("Deposit"))
            .android("debit_option", app_id("debit_account"))
            .android("amount_field", app_id("amount"))
            .android("description_field", app_id("description"))
            .android("submit_button", app_id("submit_button"))
            .android("toast_message", Locator::xpath("//android.widget.Toast[1]"))
            .android("error_message", app_id("error_message"))
            .build()
    })
}

/// Deposit form
#[derive(Debug, Clone, Copy)]
pub struct DepositPage<'s> {
    ctx: PageContext<'s>,
}

impl PageObject for DepositPage<'_> {
    fn registry(&self) -> &'static LocatorRegistry {
        registry()
    }
}

impl<'s> DepositPage<'s> {
    /// Bind to a session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            ctx: PageContext::new(session, registry()),
        }
    }

    fn tap(&self, name: &str, done: &str) -> ProbeResult<()> {
        self.ctx.click(name)?;
        self.ctx.info(done);
        Ok(())
    }

    /// Tap "LogIn" on the landing screen
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn tap_login(&self) -> ProbeResult<()> {
        self.tap("login_button", "Tapped Login button")
    }

    /// Open the dashboard
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn navigate_to_dashboard(&self) -> ProbeResult<()> {
        self.tap("dashboard_tab", "Navigated to Dashboard")
    }

    /// Open the deposit tab
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn navigate_to_deposit_tab(&self) -> ProbeResult<()> {
        self.tap("deposit_tab", "Navigated to Deposit tab")
    }

    /// Choose the debit account
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn select_debit(&self) -> ProbeResult<()> {
        self.tap("debit_option", "Selected debit account")
    }

    /// Type the deposit amount
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_amount(&self, amount: &str) -> ProbeResult<()> {
        self.ctx.type_text("amount_field", amount)?;
        self.ctx.info(&format!("Entered amount: {amount}"));
        Ok(())
    }

    /// Type the deposit description
    ///
    /// # Errors
    ///
    /// Field missing or the input was rejected.
    pub fn enter_description(&self, description: &str) -> ProbeResult<()> {
        self.ctx.type_text("description_field", description)?;
        self.ctx
            .info(&format!("Entered description: {description}"));
        Ok(())
    }

    /// Submit the deposit form
    ///
    /// # Errors
    ///
    /// Element missing or the click failed.
    pub fn submit_deposit(&self) -> ProbeResult<()> {
        self.tap("submit_button", "Submitted deposit form")
    }

    /// Text of the confirmation toast; empty when the toast has no text
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when no toast appears.
    pub fn toast_message(&self) -> ProbeResult<String> {
        let text = self
            .ctx
            .read_attribute("toast_message", "text")?
            .unwrap_or_default();
        self.ctx.info(&format!("Toast message captured: {text}"));
        Ok(text)
    }

    /// Validation error text, `None` when none is shown
    ///
    /// # Errors
    ///
    /// Lookup or read faults.
    pub fn error_message(&self) -> ProbeResult<Option<String>> {
        let message = self.ctx.read_text_if_present("error_message")?;
        if let Some(text) = &message {
            self.ctx.info(&format!("Error message captured: {text}"));
        }
        Ok(message)
    }
}
