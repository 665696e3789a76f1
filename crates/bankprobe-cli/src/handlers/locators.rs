//! Locator table inspection (`locators`, `resolve`)

use crate::commands::OutputFormat;
use crate::error::CliResult;
use bankprobe::pages::PageKind;
use bankprobe::{Locator, Platform};
use console::style;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
struct LocatorEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    locator: &'a Locator,
}

#[derive(Debug, Serialize)]
struct LocatorListing<'a> {
    page: &'a str,
    platform: Platform,
    locators: Vec<LocatorEntry<'a>>,
}

/// Render the locator table of `page` for `platform`
pub fn render_locators(page: PageKind, platform: Platform, format: OutputFormat) -> CliResult<String> {
    let registry = page.registry();
    let listing = LocatorListing {
        page: registry.page(),
        platform,
        locators: registry
            .entries(platform)
            .map(|(name, locator)| LocatorEntry { name, locator })
            .collect(),
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => {
            let mut out = format!(
                "{} ({platform}, {} locators)\n",
                style(listing.page).bold(),
                listing.locators.len()
            );
            if listing.locators.is_empty() {
                out.push_str("  (no elements on this platform)\n");
            }
            let width = listing
                .locators
                .iter()
                .map(|entry| entry.name.len())
                .max()
                .unwrap_or(0);
            for entry in &listing.locators {
                let _ = writeln!(out, "  {:<width$}  {}", entry.name, entry.locator);
            }
            Ok(out)
        }
    }
}

/// Resolve one symbolic name, as the page objects would
pub fn render_resolved(page: PageKind, platform: Platform, name: &str) -> CliResult<String> {
    let locator = page.registry().resolve(platform, name)?;
    Ok(format!("{locator}\n"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;

    mod locators_tests {
        use super::*;

        #[test]
        fn test_text_lists_every_name() {
            console::set_colors_enabled(false);
            let out = render_locators(PageKind::Login, Platform::Android, OutputFormat::Text).unwrap();
            assert!(out.starts_with("LoginPage (android, 7 locators)"));
            assert!(out.contains("login_button"));
            assert!(out.contains("(ID, \"xyz.digitalbank.demo:id/login\")"));
        }

        #[test]
        fn test_json_shape() {
            let out = render_locators(PageKind::Atm, Platform::Ios, OutputFormat::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(value["page"], "AtmPage");
            assert_eq!(value["platform"], "ios");
            let first = &value["locators"][0];
            assert!(first["name"].is_string());
            assert!(first["strategy"].is_string());
            assert!(first["selector"].is_string());
        }

        #[test]
        fn test_empty_platform_table() {
            let out = render_locators(PageKind::Deposit, Platform::Ios, OutputFormat::Text).unwrap();
            assert!(out.contains("no elements on this platform"));
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_resolves_per_platform() {
            assert_eq!(
                render_resolved(PageKind::Login, Platform::Ios, "login_button").unwrap(),
                "(ACCESSIBILITY_ID, \"LogIn\")\n"
            );
        }

        #[test]
        fn test_unknown_name() {
            let err = render_resolved(PageKind::Login, Platform::Android, "nope").unwrap_err();
            assert!(matches!(
                err,
                CliError::Bank(bankprobe::BankProbeError::UnknownElement { .. })
            ));
        }
    }
}
