//! Appium HTTP adapter
//!
//! A blocking [`MobileDriver`] over the W3C WebDriver endpoints an Appium
//! server exposes. Only the commands the executors need are covered.
//!
//! The server's implicit wait is forced to zero on connect; element waits
//! are done client-side by the action executor's poll loop.

use crate::capabilities::new_session_body;
use crate::driver::{DriverError, DriverResult, ElementId, MobileDriver, Viewport};
use crate::gestures::GestureSequence;
use crate::locator::Locator;
use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// W3C web element identifier key
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Pre-W3C element key some servers still send
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Blocking client for one Appium session
#[derive(Debug)]
pub struct AppiumDriver {
    client: Client,
    base_url: String,
    session_id: String,
}

impl AppiumDriver {
    /// Create a session and disable the server-side implicit wait
    ///
    /// When the timeout update is rejected the new session is deleted before
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Transport failures, a rejected session request, or a rejected timeout
    /// update.
    pub fn connect(
        server_url: &str,
        capabilities: &Map<String, Value>,
        request_timeout: Duration,
    ) -> DriverResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| DriverError::Transport(e.to_string()))?;
        let base_url = server_url.trim_end_matches('/').to_string();

        let value = send(
            &client,
            Method::POST,
            &format!("{base_url}/session"),
            Some(&new_session_body(capabilities)),
        )?;
        let session_id = session_id(&value)?;

        let driver = Self {
            client,
            base_url,
            session_id,
        };
        if let Err(e) = driver.command(Method::POST, "/timeouts", Some(&json!({ "implicit": 0 }))) {
            // the remote session already exists; release it before reporting
            let _ = driver.quit();
            return Err(e);
        }
        Ok(driver)
    }

    /// Remote session id
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn session_url(&self) -> String {
        format!("{}/session/{}", self.base_url, self.session_id)
    }

    fn command(&self, method: Method, path: &str, body: Option<&Value>) -> DriverResult<Value> {
        send(
            &self.client,
            method,
            &format!("{}{path}", self.session_url()),
            body,
        )
    }

    fn element_command(
        &self,
        method: Method,
        element: &ElementId,
        path: &str,
        body: Option<&Value>,
    ) -> DriverResult<Value> {
        self.command(method, &format!("/element/{element}{path}"), body)
    }
}

impl MobileDriver for AppiumDriver {
    fn find_element(&self, locator: &Locator) -> DriverResult<Option<ElementId>> {
        match self.command(Method::POST, "/element", Some(&find_body(locator))) {
            Ok(value) => element_id(&value).map(Some),
            Err(DriverError::Protocol { ref error, .. }) if error == "no such element" => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn click(&self, element: &ElementId) -> DriverResult<()> {
        self.element_command(Method::POST, element, "/click", Some(&json!({})))
            .map(drop)
    }

    fn clear(&self, element: &ElementId) -> DriverResult<()> {
        self.element_command(Method::POST, element, "/clear", Some(&json!({})))
            .map(drop)
    }

    fn send_keys(&self, element: &ElementId, text: &str) -> DriverResult<()> {
        self.element_command(Method::POST, element, "/value", Some(&send_keys_body(text)))
            .map(drop)
    }

    fn text(&self, element: &ElementId) -> DriverResult<String> {
        let value = self.element_command(Method::GET, element, "/text", None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn attribute(&self, element: &ElementId, name: &str) -> DriverResult<Option<String>> {
        let value =
            self.element_command(Method::GET, element, &format!("/attribute/{name}"), None)?;
        Ok(attribute_value(value))
    }

    fn is_displayed(&self, element: &ElementId) -> DriverResult<bool> {
        let value = self.element_command(Method::GET, element, "/displayed", None)?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn window_size(&self) -> DriverResult<Viewport> {
        let value = self.command(Method::GET, "/window/rect", None)?;
        viewport(&value)
    }

    fn perform_gesture(&self, gesture: &GestureSequence) -> DriverResult<()> {
        self.command(Method::POST, "/actions", Some(&actions_body(gesture)))?;
        self.command(Method::DELETE, "/actions", None).map(drop)
    }

    fn hide_keyboard(&self) -> DriverResult<()> {
        self.command(Method::POST, "/appium/device/hide_keyboard", Some(&json!({})))
            .map(drop)
    }

    fn quit(&self) -> DriverResult<()> {
        send(&self.client, Method::DELETE, &self.session_url(), None).map(drop)
    }
}

fn send(client: &Client, method: Method, url: &str, body: Option<&Value>) -> DriverResult<Value> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request
        .send()
        .map_err(|e| DriverError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .map_err(|e| DriverError::Transport(e.to_string()))?;
    parse_response(status, &text)
}

/// Unwrap the `value` member of a WebDriver response
///
/// # Errors
///
/// Malformed JSON, or the mapped protocol error for non-2xx statuses.
pub fn parse_response(status: u16, body: &str) -> DriverResult<Value> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| DriverError::Transport(format!("malformed response (HTTP {status}): {e}")))?;
    let value = json.get("value").cloned().unwrap_or(Value::Null);
    if (200..300).contains(&status) {
        Ok(value)
    } else {
        Err(protocol_error(status, &value))
    }
}

/// Map a W3C error payload to a driver fault
#[must_use]
pub fn protocol_error(status: u16, value: &Value) -> DriverError {
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    match error {
        "stale element reference" => DriverError::StaleElement,
        "invalid session id" => DriverError::SessionClosed,
        _ => DriverError::Protocol {
            status,
            error: error.to_string(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
    }
}

/// Element id from a find response
///
/// # Errors
///
/// `Transport` when neither element key is present.
pub fn element_id(value: &Value) -> DriverResult<ElementId> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(ElementId::new)
        .ok_or_else(|| DriverError::Transport(format!("no element reference in {value}")))
}

fn session_id(value: &Value) -> DriverResult<String> {
    value
        .get("sessionId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DriverError::Transport(format!("no session id in {value}")))
}

/// Viewport from a window rect response
///
/// # Errors
///
/// `Transport` when width or height is missing.
pub fn viewport(value: &Value) -> DriverResult<Viewport> {
    let dim = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v.round().max(0.0) as u32)
            .ok_or_else(|| DriverError::Transport(format!("window rect without {key}: {value}")))
    };
    Ok(Viewport::new(dim("width")?, dim("height")?))
}

/// Find-element request body
#[must_use]
pub fn find_body(locator: &Locator) -> Value {
    json!({
        "using": locator.strategy().as_wire(),
        "value": locator.selector(),
    })
}

/// Send-keys request body
#[must_use]
pub fn send_keys_body(text: &str) -> Value {
    json!({
        "text": text,
        "value": text.chars().map(String::from).collect::<Vec<_>>(),
    })
}

/// Single touch-pointer actions request body
#[must_use]
pub fn actions_body(gesture: &GestureSequence) -> Value {
    json!({
        "actions": [{
            "type": "pointer",
            "id": "finger1",
            "parameters": { "pointerType": "touch" },
            "actions": gesture.actions,
        }]
    })
}

fn attribute_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
