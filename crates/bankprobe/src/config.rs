//! Suite configuration
//!
//! Values come from three layers, later wins:
//!
//! 1. built-in defaults
//! 2. a YAML file
//! 3. environment variables
//!
//! ```yaml
//! appium_server_url: http://127.0.0.1:4723/wd/hub
//! platform: android
//! implicit_wait_secs: 15
//! android:
//!   device_name: Pixel 8
//! ```

use crate::platform::Platform;
use crate::result::{BankProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Placeholder shown instead of secrets
pub const REDACTED: &str = "***";

/// Environment variable names
pub mod env {
    /// Remote automation server URL
    pub const APPIUM_SERVER_URL: &str = "APPIUM_SERVER_URL";
    /// Cloud device-farm token
    pub const SECURITY_TOKEN: &str = "PERFECTO_SECURITY_TOKEN";
    /// `android` or `ios`
    pub const PLATFORM: &str = "PLATFORM";
    /// Default element wait, seconds
    pub const IMPLICIT_WAIT: &str = "IMPLICIT_WAIT";
    /// Server-side idle timeout, seconds
    pub const COMMAND_TIMEOUT: &str = "COMMAND_TIMEOUT";
    /// Android device name
    pub const ANDROID_DEVICE_NAME: &str = "ANDROID_DEVICE_NAME";
    /// Android OS version
    pub const ANDROID_PLATFORM_VERSION: &str = "ANDROID_PLATFORM_VERSION";
    /// iOS device name
    pub const IOS_DEVICE_NAME: &str = "IOS_DEVICE_NAME";
    /// iOS version
    pub const IOS_PLATFORM_VERSION: &str = "IOS_PLATFORM_VERSION";
    /// iOS device UDID
    pub const IOS_UDID: &str = "IOS_UDID";
    /// Xcode signing identity
    pub const IOS_XCODE_SIGNING_ID: &str = "IOS_XCODE_SIGNING_ID";
    /// Test account user name
    pub const TEST_USERNAME: &str = "TEST_USERNAME";
    /// Test account password
    pub const TEST_PASSWORD: &str = "TEST_PASSWORD";
}

/// Android device and app identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidDevice {
    /// Device name
    pub device_name: String,
    /// OS version
    pub platform_version: String,
    /// Physical device id
    pub device_id: String,
    /// Application package
    pub app_package: String,
    /// Launch activity
    pub app_activity: String,
}

impl Default for AndroidDevice {
    fn default() -> Self {
        Self {
            device_name: "R3CW60ABQBB".to_string(),
            platform_version: "14".to_string(),
            device_id: "R3CW60ABQBB".to_string(),
            app_package: "xyz.digitalbank.demo".to_string(),
            app_activity: "com.digitalbank.activities.MainActivity".to_string(),
        }
    }
}

/// iOS device and app identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IosDevice {
    /// Device name
    pub device_name: String,
    /// OS version
    pub platform_version: String,
    /// Device UDID
    pub udid: String,
    /// Application bundle id
    pub bundle_id: String,
    /// Xcode signing identity
    pub xcode_signing_id: String,
}

impl Default for IosDevice {
    fn default() -> Self {
        Self {
            device_name: "iPhone 11".to_string(),
            platform_version: "17.3.1".to_string(),
            udid: "00008030-001824812E28802E".to_string(),
            bundle_id: "demoddbank.perforce.com".to_string(),
            xcode_signing_id: "iPhone Developer".to_string(),
        }
    }
}

/// Test account used by the smoke flows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Login email
    pub username: String,
    /// Login password
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "demo_user@example.com".to_string(),
            password: "Password123".to_string(),
        }
    }
}

/// Complete suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Remote automation server
    pub appium_server_url: String,
    /// Cloud device-farm token, sent as `appium:securityToken`
    pub security_token: Option<String>,
    /// Target platform
    pub platform: Platform,
    /// Default element wait
    pub implicit_wait_secs: u64,
    /// Server-side idle timeout
    pub command_timeout_secs: u64,
    /// Wait used by visibility checks
    pub visibility_timeout_secs: u64,
    /// Pause between element lookups
    pub poll_interval_ms: u64,
    /// Android target
    pub android: AndroidDevice,
    /// iOS target
    pub ios: IosDevice,
    /// Test account
    pub credentials: Credentials,
    /// Directory for `test_execution.log`
    pub logs_dir: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            appium_server_url: "http://127.0.0.1:4723/wd/hub".to_string(),
            security_token: None,
            platform: Platform::Ios,
            implicit_wait_secs: 10,
            command_timeout_secs: 120,
            visibility_timeout_secs: 3,
            poll_interval_ms: 500,
            android: AndroidDevice::default(),
            ios: IosDevice::default(),
            credentials: Credentials::default(),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl ProbeConfig {
    /// Defaults, then `path` if given, then the process environment
    ///
    /// # Errors
    ///
    /// Unreadable or malformed file, or an invalid environment value.
    pub fn load(path: Option<&Path>) -> ProbeResult<Self> {
        let base = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parse YAML; missing keys keep their defaults and unknown keys are
    /// ignored. The platform is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// `Configuration` for an unsupported platform, `Yaml` for malformed
    /// YAML or other wrongly typed values.
    pub fn from_yaml(yaml: &str) -> ProbeResult<Self> {
        let mut value: serde_yaml_ng::Value = serde_yaml_ng::from_str(yaml)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        if let Some(raw) = value.get_mut("platform") {
            let platform = match raw.as_str() {
                Some(name) => Platform::from_str(name)?,
                None => {
                    return Err(BankProbeError::configuration(format!(
                        "platform must be 'android' or 'ios', got {raw:?}"
                    )))
                }
            };
            *raw = serde_yaml_ng::Value::from(platform.as_str());
        }
        Ok(serde_yaml_ng::from_value(value)?)
    }

    /// Read and parse a YAML file
    ///
    /// # Errors
    ///
    /// Unreadable file, or see [`Self::from_yaml`].
    pub fn from_yaml_file(path: &Path) -> ProbeResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Serialization failure.
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Apply overrides from `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// `Configuration` for a non-numeric timeout or an unsupported platform.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> ProbeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(env::APPIUM_SERVER_URL) {
            self.appium_server_url = url;
        }
        if let Some(token) = get(env::SECURITY_TOKEN) {
            self.security_token = Some(token);
        }
        if let Some(platform) = get(env::PLATFORM) {
            self.platform = Platform::from_str(&platform)?;
        }
        if let Some(secs) = get(env::IMPLICIT_WAIT) {
            self.implicit_wait_secs = parse_secs(env::IMPLICIT_WAIT, &secs)?;
        }
        if let Some(secs) = get(env::COMMAND_TIMEOUT) {
            self.command_timeout_secs = parse_secs(env::COMMAND_TIMEOUT, &secs)?;
        }

        let strings: [(&str, &mut String); 8] = [
            (env::ANDROID_DEVICE_NAME, &mut self.android.device_name),
            (env::ANDROID_PLATFORM_VERSION, &mut self.android.platform_version),
            (env::IOS_DEVICE_NAME, &mut self.ios.device_name),
            (env::IOS_PLATFORM_VERSION, &mut self.ios.platform_version),
            (env::IOS_UDID, &mut self.ios.udid),
            (env::IOS_XCODE_SIGNING_ID, &mut self.ios.xcode_signing_id),
            (env::TEST_USERNAME, &mut self.credentials.username),
            (env::TEST_PASSWORD, &mut self.credentials.password),
        ];
        for (key, slot) in strings {
            if let Some(value) = get(key) {
                *slot = value;
            }
        }

        Ok(self)
    }

    /// Override the platform
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Token, ignoring an empty one
    #[must_use]
    pub fn security_token(&self) -> Option<&str> {
        self.security_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Default wait for element operations
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Wait for visibility checks
    #[must_use]
    pub const fn visibility_timeout(&self) -> Duration {
        Duration::from_secs(self.visibility_timeout_secs)
    }

    /// Pause between lookups
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Copy with secrets masked, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.security_token().is_some() {
            copy.security_token = Some(REDACTED.to_string());
        }
        copy.credentials.password = REDACTED.to_string();
        copy
    }
}

fn parse_secs(key: &str, value: &str) -> ProbeResult<u64> {
    value.trim().parse().map_err(|_| {
        BankProbeError::configuration(format!("{key} must be a whole number of seconds, got '{value}'"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    mod default_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = ProbeConfig::default();
            assert_eq!(config.appium_server_url, "http://127.0.0.1:4723/wd/hub");
            assert_eq!(config.platform, Platform::Ios);
            assert_eq!(config.default_timeout(), Duration::from_secs(10));
            assert_eq!(config.command_timeout_secs, 120);
            assert_eq!(config.visibility_timeout(), Duration::from_secs(3));
            assert_eq!(config.poll_interval(), Duration::from_millis(500));
            assert_eq!(config.android.app_package, "xyz.digitalbank.demo");
            assert_eq!(config.ios.bundle_id, "demoddbank.perforce.com");
            assert_eq!(config.logs_dir, PathBuf::from("logs"));
            assert!(config.security_token().is_none());
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = ProbeConfig::from_yaml(
                "platform: android\nimplicit_wait_secs: 15\nandroid:\n  device_name: Pixel 8\n",
            )
            .unwrap();
            assert_eq!(config.platform, Platform::Android);
            assert_eq!(config.implicit_wait_secs, 15);
            assert_eq!(config.android.device_name, "Pixel 8");
            assert_eq!(config.android.platform_version, "14");
            assert_eq!(config.ios, IosDevice::default());
        }

        #[test]
        fn test_bad_yaml_is_error() {
            let err = ProbeConfig::from_yaml("implicit_wait_secs: soon").unwrap_err();
            assert!(matches!(err, BankProbeError::Yaml(_)));
        }

        #[test]
        fn test_unsupported_platform_in_yaml() {
            let err = ProbeConfig::from_yaml("platform: windows\n").unwrap_err();
            assert!(matches!(err, BankProbeError::Configuration { .. }));
            assert!(err.to_string().contains("windows"));

            let err = ProbeConfig::from_yaml("platform: [ios]\n").unwrap_err();
            assert!(matches!(err, BankProbeError::Configuration { .. }));
        }

        #[test]
        fn test_platform_case_insensitive_in_yaml() {
            let config = ProbeConfig::from_yaml("platform: iOS\n").unwrap();
            assert_eq!(config.platform, Platform::Ios);
            let config = ProbeConfig::from_yaml("platform: Android\n").unwrap();
            assert_eq!(config.platform, Platform::Android);
        }

        #[test]
        fn test_empty_yaml_is_default() {
            assert_eq!(ProbeConfig::from_yaml("").unwrap(), ProbeConfig::default());
        }

        #[test]
        fn test_unknown_keys_are_ignored() {
            let config = ProbeConfig::from_yaml("reports_dir: out\nlogs_dir: run-logs\n").unwrap();
            assert_eq!(config.logs_dir, PathBuf::from("run-logs"));
            assert!(!config.to_yaml().unwrap().contains("reports_dir"));
        }

        #[test]
        fn test_from_file() {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "appium_server_url: http://farm:4723/wd/hub").unwrap();
            let config = ProbeConfig::from_yaml_file(file.path()).unwrap();
            assert_eq!(config.appium_server_url, "http://farm:4723/wd/hub");
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = ProbeConfig::from_yaml_file(&dir.path().join("nope.yaml")).unwrap_err();
            assert!(matches!(err, BankProbeError::Io(_)));
        }

        #[test]
        fn test_yaml_round_trip() {
            let config = ProbeConfig::default().with_platform(Platform::Android);
            let parsed = ProbeConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
            assert_eq!(parsed, config);
        }
    }

    mod env_tests {
        use super::*;

        #[test]
        fn test_env_overrides_file_values() {
            let config = ProbeConfig::from_yaml("platform: ios\n")
                .unwrap()
                .with_env_overrides(lookup(&[
                    ("PLATFORM", "Android"),
                    ("IMPLICIT_WAIT", "20"),
                    ("ANDROID_DEVICE_NAME", "emulator-5554"),
                    ("PERFECTO_SECURITY_TOKEN", "tok"),
                    ("TEST_USERNAME", "qa@example.com"),
                ]))
                .unwrap();
            assert_eq!(config.platform, Platform::Android);
            assert_eq!(config.implicit_wait_secs, 20);
            assert_eq!(config.android.device_name, "emulator-5554");
            assert_eq!(config.security_token(), Some("tok"));
            assert_eq!(config.credentials.username, "qa@example.com");
        }

        #[test]
        fn test_empty_values_are_unset() {
            let config = ProbeConfig::default()
                .with_env_overrides(lookup(&[("PERFECTO_SECURITY_TOKEN", ""), ("PLATFORM", " ")]))
                .unwrap();
            assert!(config.security_token().is_none());
            assert_eq!(config.platform, Platform::Ios);
        }

        #[test]
        fn test_unsupported_platform() {
            let err = ProbeConfig::default()
                .with_env_overrides(lookup(&[("PLATFORM", "windows")]))
                .unwrap_err();
            assert!(matches!(err, BankProbeError::Configuration { .. }));
        }

        #[test]
        fn test_non_numeric_timeout() {
            let err = ProbeConfig::default()
                .with_env_overrides(lookup(&[("COMMAND_TIMEOUT", "two minutes")]))
                .unwrap_err();
            assert!(err.to_string().contains("COMMAND_TIMEOUT"));
        }
    }

    mod redaction_tests {
        use super::*;

        #[test]
        fn test_redacted_masks_secrets() {
            let mut config = ProbeConfig::default();
            config.security_token = Some("secret-token".into());
            let shown = config.redacted();
            assert_eq!(shown.security_token.as_deref(), Some(REDACTED));
            assert_eq!(shown.credentials.password, REDACTED);
            assert!(!shown.to_yaml().unwrap().contains("secret-token"));
        }

        #[test]
        fn test_redacted_keeps_absent_token_absent() {
            assert!(ProbeConfig::default().redacted().security_token.is_none());
        }
    }
}
