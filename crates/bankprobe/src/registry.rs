//! Locator registries: per-page, per-platform symbolic name tables.

use crate::locator::Locator;
use crate::platform::Platform;
use crate::result::{BankProbeError, ProbeResult};
use std::collections::BTreeMap;

/// Fixed mapping from symbolic element name to [`Locator`] for one page,
/// one table per platform.
///
/// Registries are assembled once through [`LocatorRegistryBuilder`] and are
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct LocatorRegistry {
    page: String,
    android: BTreeMap<String, Locator>,
    ios: BTreeMap<String, Locator>,
}

impl LocatorRegistry {
    /// Start building a registry for a page
    #[must_use]
    pub fn builder(page: impl Into<String>) -> LocatorRegistryBuilder {
        LocatorRegistryBuilder::new(page)
    }

    /// Page this registry belongs to
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Look up `name` in the table for `platform`.
    pub fn resolve(&self, platform: Platform, name: &str) -> ProbeResult<&Locator> {
        self.table(platform)
            .get(name)
            .ok_or_else(|| BankProbeError::UnknownElement {
                page: self.page.clone(),
                platform,
                name: name.to_string(),
            })
    }

    /// Whether `name` is registered for `platform`
    #[must_use]
    pub fn contains(&self, platform: Platform, name: &str) -> bool {
        self.table(platform).contains_key(name)
    }

    /// Registered names for `platform`, sorted
    #[must_use]
    pub fn names(&self, platform: Platform) -> Vec<&str> {
        self.table(platform).keys().map(String::as_str).collect()
    }

    /// Entries for `platform`, sorted by name
    pub fn entries(&self, platform: Platform) -> impl Iterator<Item = (&str, &Locator)> {
        self.table(platform).iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries for `platform`
    #[must_use]
    pub fn len(&self, platform: Platform) -> usize {
        self.table(platform).len()
    }

    /// True when neither platform has entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.android.is_empty() && self.ios.is_empty()
    }

    const fn table(&self, platform: Platform) -> &BTreeMap<String, Locator> {
        match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
        }
    }
}

/// Builder for [`LocatorRegistry`]
#[derive(Debug, Clone)]
pub struct LocatorRegistryBuilder {
    page: String,
    android: BTreeMap<String, Locator>,
    ios: BTreeMap<String, Locator>,
}

impl LocatorRegistryBuilder {
    /// Create a builder for a page
    #[must_use]
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            android: BTreeMap::new(),
            ios: BTreeMap::new(),
        }
    }

    /// Register an Android-only entry
    #[must_use]
    pub fn android(mut self, name: impl Into<String>, locator: Locator) -> Self {
        let _ = self.android.insert(name.into(), locator);
        self
    }

    /// Register an iOS-only entry
    #[must_use]
    pub fn ios(mut self, name: impl Into<String>, locator: Locator) -> Self {
        let _ = self.ios.insert(name.into(), locator);
        self
    }

    /// Register the same name on both platforms
    #[must_use]
    pub fn both(self, name: impl Into<String>, android: Locator, ios: Locator) -> Self {
        let name = name.into();
        self.android(name.clone(), android).ios(name, ios)
    }

    /// Register one locator shared by both platforms
    #[must_use]
    pub fn shared(self, name: impl Into<String>, locator: Locator) -> Self {
        self.both(name, locator.clone(), locator)
    }

    /// Finish the registry
    #[must_use]
    pub fn build(self) -> LocatorRegistry {
        LocatorRegistry {
            page: self.page,
            android: self.android,
            ios: self.ios,
        }
    }
}
