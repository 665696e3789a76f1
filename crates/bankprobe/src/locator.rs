//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an immutable `(strategy, selector)` pair. The selector is
//! opaque here; only the remote driver interprets it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy used by the remote driver to locate an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Resource id (Android) or element id
    Id,
    /// Accessibility identifier / content description
    AccessibilityId,
    /// iOS NSPredicate string
    IosPredicate,
    /// iOS class chain query
    IosClassChain,
    /// XPath expression
    XPath,
    /// Android UiAutomator `UiSelector` expression
    AndroidUiAutomator,
    /// Native class name
    ClassName,
}

impl Strategy {
    /// All strategies, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::AccessibilityId,
        Self::IosPredicate,
        Self::IosClassChain,
        Self::XPath,
        Self::AndroidUiAutomator,
        Self::ClassName,
    ];

    /// The `using` value sent to an Appium server
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::AccessibilityId => "accessibility id",
            Self::IosPredicate => "-ios predicate string",
            Self::IosClassChain => "-ios class chain",
            Self::XPath => "xpath",
            Self::AndroidUiAutomator => "-android uiautomator",
            Self::ClassName => "class name",
        }
    }

    /// Short label used in log lines
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::AccessibilityId => "ACCESSIBILITY_ID",
            Self::IosPredicate => "IOS_PREDICATE",
            Self::IosClassChain => "IOS_CLASS_CHAIN",
            Self::XPath => "XPATH",
            Self::AndroidUiAutomator => "ANDROID_UIAUTOMATOR",
            Self::ClassName => "CLASS_NAME",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A `(strategy, selector)` pair identifying a UI element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    selector: String,
}

impl Locator {
    /// Create a locator from a strategy and selector string
    #[must_use]
    pub fn new(strategy: Strategy, selector: impl Into<String>) -> Self {
        Self {
            strategy,
            selector: selector.into(),
        }
    }

    /// Resource id locator
    #[must_use]
    pub fn id(selector: impl Into<String>) -> Self {
        Self::new(Strategy::Id, selector)
    }

    /// Accessibility id locator
    #[must_use]
    pub fn accessibility_id(selector: impl Into<String>) -> Self {
        Self::new(Strategy::AccessibilityId, selector)
    }

    /// iOS predicate string locator
    #[must_use]
    pub fn ios_predicate(selector: impl Into<String>) -> Self {
        Self::new(Strategy::IosPredicate, selector)
    }

    /// iOS class chain locator
    #[must_use]
    pub fn ios_class_chain(selector: impl Into<String>) -> Self {
        Self::new(Strategy::IosClassChain, selector)
    }

    /// XPath locator
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, selector)
    }

    /// Android UiAutomator locator
    #[must_use]
    pub fn android_uiautomator(selector: impl Into<String>) -> Self {
        Self::new(Strategy::AndroidUiAutomator, selector)
    }

    /// Class name locator
    #[must_use]
    pub fn class_name(selector: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, selector)
    }

    /// `new UiSelector().text("...")` for Android widgets with visible text
    #[must_use]
    pub fn android_text(text: &str) -> Self {
        Self::android_uiautomator(format!("new UiSelector().text({})", quote(text)))
    }

    /// Static text element matched by name in an iOS class chain, 1-based index
    #[must_use]
    pub fn ios_static_text(name: &str, index: u32) -> Self {
        Self::ios_class_chain(format!(
            "**/XCUIElementTypeStaticText[`name == {}`][{index}]",
            quote(name)
        ))
    }

    /// The strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The selector string
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.strategy, self.selector)
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
