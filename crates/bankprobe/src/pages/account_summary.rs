//! Account summary
//!
//! The two platforms expose different element sets, so the tables differ by
//! name as well as by locator.

use super::app_id;
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
        LocatorRegistry::builder("AccountSummaryPage")
            .android("welcome_text", app_id("welcomeText"))
            .android("name", app_id("name"))
            .android("account_number_label", app_id("accountNumberLabel"))
            .android("account_number", app_id("accountNumber"))
            .android("account_name_label", app_id("accountNameLabel"))
            .android("account_type_name", app_id("accountTypeName"))
            .android("balance_label", app_id("balanceLabel"))
            .android("balance", app_id("balance"))
            .android("select_account_text", app_id("selectAccountText"))
            .android("dropdown_item", Locator::id("android:id/text1"))
            .ios("login_button", Locator::accessibility_id("LogIn"))
            .ios(
                "welcome_text",
                Locator::ios_class_chain("**/XCUIElementTypeStaticText[`name == \"Welcome\"`]"),
            )
            .ios("name", Locator::accessibility_id(" Mr. Josh Smith"))
            .ios("account_number_label", Locator::accessibility_id("Account Number:"))
            .ios("account_number", Locator::accessibility_id("486136373"))
            .ios("account_type_label", Locator::accessibility_id("Account Type:"))
            .ios("account_type", Locator::accessibility_id("Individual Savings"))
            .ios("balance_label", Locator::accessibility_id("Balance:"))
            .ios("balance", Locator::ios_static_text("1000393.0", 1))
            .ios("picker_wheel", Locator::class_name("XCUIElementTypePickerWheel"))
            .ios("amount_entry", Locator::ios_static_text("3000.0", 2))
            .build()
    })
}

/// Locators of one transaction row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    /// Description cell
    pub label: Locator,
    /// Amount cell
    pub amount: Locator,
    /// Running balance cell
    pub balance: Locator,
}

impl TransactionRow {
    /// Row locators for `platform`, built from the visible cell texts
    #[must_use]
    pub fn locate(platform: Platform, label: &str, amount: &str, balance: &str) -> Self {
        match platform {
            Platform::Android => Self {
                label: Locator::android_text(label),
                amount: Locator::android_text(amount),
                balance: Locator::android_text(balance),
            },
            Platform::Ios => Self {
                label: Locator::ios_static_text(label, 1),
                amount: Locator::ios_static_text(amount, 1),
                balance: Locator::accessibility_id(balance),
            },
        }
    }
}

/// Account summary screen
#[derive(Debug, Clone, Copy)]
pub struct AccountSummaryPage<'s> {
    ctx: PageContext<'s>,
}

impl PageObject for AccountSummaryPage<'_> {
    fn registry(&self) -> &'static LocatorRegistry {
        registry()
    }
}

impl<'s> AccountSummaryPage<'s> {
    /// Bind to a session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        let page = Self {
            ctx: PageContext::new(session, registry()),
        };
        page.ctx
            .info(&format!("Initialized AccountSummaryPage for platform: {}", session.platform()));
        page
    }

    /// Click any element of the active table by name
    ///
    /// # Errors
    ///
    /// `UnknownElement`, or the click failed.
    pub fn click_element(&self, name: &str) -> ProbeResult<()> {
        self.ctx.info(&format!("Clicking element: {name}"));
        self.ctx.click(name)
    }

    /// Type into any element of the active table by name
    ///
    /// # Errors
    ///
    /// `UnknownElement`, or the input was rejected.
    pub fn enter_text(&self, name: &str, text: &str) -> ProbeResult<()> {
        self.ctx.info(&format!(
            "Entering text ({} chars) into element: {name}",
            text.chars().count()
        ));
        self.ctx.type_text(name, text)
    }

    /// Pick the amount from the iOS picker wheel; no-op on Android
    ///
    /// # Errors
    ///
    /// Picker or entry missing.
    pub fn select_picker_value(&self) -> ProbeResult<()> {
        if self.ctx.platform() != Platform::Ios {
            return Ok(());
        }
        self.ctx.info("Selecting value from picker wheel (iOS)");
        self.click_element("picker_wheel")?;
        self.click_element("amount_entry")
    }

    /// Choose an account from the Android dropdown; no-op on iOS
    ///
    /// # Errors
    ///
    /// Dropdown or account entry missing.
    pub fn select_account_from_dropdown(&self, account_name: &str) -> ProbeResult<()> {
        if self.ctx.platform() != Platform::Android {
            return Ok(());
        }
        self.ctx
            .info(&format!("Selecting account from dropdown: {account_name}"));
        self.click_element("select_account_text")?;
        self.click_element("dropdown_item")?;
        self.ctx.click_locator(&Locator::android_text(account_name))
    }

    /// Scroll to the history and tap each cell of a transaction row
    ///
    /// # Errors
    ///
    /// Swipe failure, or any cell is missing.
    pub fn verify_transaction(&self, label: &str, amount: &str, balance: &str) -> ProbeResult<()> {
        self.ctx.info(&format!(
            "Verifying transaction - Label: {label}, Amount: {amount}, Balance: {balance}"
        ));
        let row = TransactionRow::locate(self.ctx.platform(), label, amount, balance);
        self.ctx.session().gestures().swipe_up()?;
        for cell in [&row.label, &row.amount, &row.balance] {
            self.ctx.click_locator(cell)?;
        }
        Ok(())
    }
}
