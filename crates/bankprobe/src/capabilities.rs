//! Session capabilities
//!
//! Builds the W3C capability map for the configured platform. Vendor keys
//! carry the `appium:` prefix.

use crate::config::ProbeConfig;
use crate::platform::Platform;
use serde_json::{json, Map, Value};

/// Capability key for the cloud device-farm token
pub const SECURITY_TOKEN_KEY: &str = "appium:securityToken";

/// Capabilities for `config.platform`, with the token when one is set
#[must_use]
pub fn for_platform(config: &ProbeConfig) -> Map<String, Value> {
    let mut caps = match config.platform {
        Platform::Android => android(config),
        Platform::Ios => ios(config),
    };
    if let Some(token) = config.security_token() {
        let _ = caps.insert(SECURITY_TOKEN_KEY.to_string(), Value::from(token));
    }
    caps
}

/// Body of the new-session request
#[must_use]
pub fn new_session_body(capabilities: &Map<String, Value>) -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": capabilities,
            "firstMatch": [{}],
        }
    })
}

fn android(config: &ProbeConfig) -> Map<String, Value> {
    let device = &config.android;
    let mut caps = common(config, Platform::Android);
    caps.extend([
        ("appium:platformVersion".to_string(), Value::from(device.platform_version.as_str())),
        ("appium:deviceName".to_string(), Value::from(device.device_name.as_str())),
        ("appium:deviceId".to_string(), Value::from(device.device_id.as_str())),
        ("appium:appPackage".to_string(), Value::from(device.app_package.as_str())),
        ("appium:appActivity".to_string(), Value::from(device.app_activity.as_str())),
    ]);
    caps
}

fn ios(config: &ProbeConfig) -> Map<String, Value> {
    let device = &config.ios;
    let mut caps = common(config, Platform::Ios);
    caps.extend([
        ("appium:platformVersion".to_string(), Value::from(device.platform_version.as_str())),
        ("appium:deviceName".to_string(), Value::from(device.device_name.as_str())),
        ("appium:udid".to_string(), Value::from(device.udid.as_str())),
        ("appium:bundleId".to_string(), Value::from(device.bundle_id.as_str())),
        ("appium:xcodeSigningId".to_string(), Value::from(device.xcode_signing_id.as_str())),
    ]);
    caps
}

fn common(config: &ProbeConfig, platform: Platform) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.extend([
        ("platformName".to_string(), Value::from(platform.platform_name())),
        ("appium:automationName".to_string(), Value::from(platform.automation_name())),
        ("appium:noReset".to_string(), Value::Bool(true)),
        ("appium:newCommandTimeout".to_string(), Value::from(config.command_timeout_secs)),
    ]);
    caps
}
