//! Platform selection and per-platform locator resolution.

use crate::locator::Locator;
use crate::result::{BankProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported mobile platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android (UIAutomator2)
    Android,
    /// iOS (XCUITest)
    Ios,
}

impl Platform {
    /// Both platforms
    pub const ALL: [Self; 2] = [Self::Android, Self::Ios];

    /// Configuration value for this platform
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// `platformName` capability value
    #[must_use]
    pub const fn platform_name(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }

    /// Appium automation engine for this platform
    #[must_use]
    pub const fn automation_name(&self) -> &'static str {
        match self {
            Self::Android => "UIAutomator2",
            Self::Ios => "XCUITest",
        }
    }

    /// Pick the value that matches this platform
    pub fn select<T>(self, android: T, ios: T) -> T {
        match self {
            Self::Android => android,
            Self::Ios => ios,
        }
    }

    /// True on Android
    #[must_use]
    pub const fn is_android(&self) -> bool {
        matches!(self, Self::Android)
    }

    /// True on iOS
    #[must_use]
    pub const fn is_ios(&self) -> bool {
        matches!(self, Self::Ios)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = BankProbeError;

    fn from_str(s: &str) -> ProbeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "" => Err(BankProbeError::configuration(
                "platform is not set (expected 'android' or 'ios')",
            )),
            other => Err(BankProbeError::configuration(format!(
                "unsupported platform '{other}' (expected 'android' or 'ios')"
            ))),
        }
    }
}

/// The two candidate locators for one logical element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLocator {
    /// Android locator
    pub android: Locator,
    /// iOS locator
    pub ios: Locator,
}

impl PlatformLocator {
    /// Pair an Android and an iOS locator
    #[must_use]
    pub const fn new(android: Locator, ios: Locator) -> Self {
        Self { android, ios }
    }

    /// Locator for the active platform
    #[must_use]
    pub const fn resolve(&self, platform: Platform) -> &Locator {
        match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
        }
    }
}

/// Resolve the locator for a platform given as a configuration string.
pub fn resolve_for(platform: &str, candidates: &PlatformLocator) -> ProbeResult<Locator> {
    let platform: Platform = platform.parse()?;
    Ok(candidates.resolve(platform).clone())
}
