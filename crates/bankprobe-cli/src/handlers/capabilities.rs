//! Capability preview

use crate::error::CliResult;
use bankprobe::{capabilities, ProbeConfig};

/// Capabilities a new session would request, token masked
pub fn render_capabilities(config: &ProbeConfig) -> CliResult<String> {
    let caps = capabilities::for_platform(&config.redacted());
    Ok(serde_json::to_string_pretty(&caps)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use bankprobe::{Platform, REDACTED};

    #[test]
    fn test_android_capabilities() {
        let config = ProbeConfig::default().with_platform(Platform::Android);
        let out = render_capabilities(&config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["platformName"], "Android");
        assert_eq!(value["appium:automationName"], "UIAutomator2");
    }

    #[test]
    fn test_token_is_masked() {
        let mut config = ProbeConfig::default().with_platform(Platform::Ios);
        config.security_token = Some("s3cr3t".to_string());
        let out = render_capabilities(&config).unwrap();
        assert!(!out.contains("s3cr3t"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[capabilities::SECURITY_TOKEN_KEY], REDACTED);
    }

    #[test]
    fn test_no_token_key_without_token() {
        let out = render_capabilities(&ProbeConfig::default()).unwrap();
        assert!(!out.contains(capabilities::SECURITY_TOKEN_KEY));
    }
}
