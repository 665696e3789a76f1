//! Config command handler

use crate::error::CliResult;
use bankprobe::ProbeConfig;

/// Effective configuration as YAML, secrets masked
pub fn render_config(config: &ProbeConfig) -> CliResult<String> {
    Ok(config.redacted().to_yaml()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_yaml() {
        let config = ProbeConfig::default();
        let out = render_config(&config).unwrap();
        let parsed = ProbeConfig::from_yaml(&out).unwrap();
        assert_eq!(parsed.appium_server_url, config.appium_server_url);
        assert_eq!(parsed.platform, config.platform);
    }

    #[test]
    fn test_secrets_are_masked() {
        let mut config = ProbeConfig::default();
        config.security_token = Some("s3cr3t".to_string());
        config.credentials.password = "hunter2".to_string();
        let out = render_config(&config).unwrap();
        assert!(!out.contains("s3cr3t"));
        assert!(!out.contains("hunter2"));
        assert!(out.contains(bankprobe::REDACTED));
    }
}
