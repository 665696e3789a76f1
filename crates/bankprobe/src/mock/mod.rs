//! Mock driver for page-object testing without a device
//!
//! [`MockDriver`] is a scripted in-memory screen: register elements under
//! their locators, run page-object code against it, then inspect the calls it
//! received.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bankprobe::mock::{MockDriver, MockElement};
//!
//! let driver = MockDriver::new()
//!     .with_element(Locator::id("xyz.digitalbank.demo:id/login"), MockElement::new());
//! let session = Session::with_driver(Box::new(driver.clone()), Platform::Android, settings, sink);
//! LoginPage::new(&session).click_login_button()?;
//! assert_eq!(driver.clicks_on(&Locator::id("xyz.digitalbank.demo:id/login")), 1);
//! ```

use crate::driver::{DriverError, DriverResult, ElementId, MobileDriver, Viewport};
use crate::gestures::GestureSequence;
use crate::locator::Locator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// A call received by the mock, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// Element lookup
    Find(Locator),
    /// Click
    Click(Locator),
    /// Clear
    Clear(Locator),
    /// Send keys
    SendKeys(Locator, String),
    /// Read text
    Text(Locator),
    /// Read attribute
    Attribute(Locator, String),
    /// Displayed query
    IsDisplayed(Locator),
    /// Window size query
    WindowSize,
    /// Gesture by name
    Gesture(&'static str),
    /// Keyboard dismissal
    HideKeyboard,
    /// Session end
    Quit,
}

/// Scripted state of one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Displayed text
    pub text: String,
    /// Displayed flag
    pub displayed: bool,
    /// Attributes by name
    pub attributes: HashMap<String, String>,
    /// Lookups that miss before the element shows up
    pub appears_after: u32,
    /// Fault returned by `click`
    pub click_failure: Option<DriverError>,
    /// Fault returned by `clear`/`send_keys`
    pub type_failure: Option<DriverError>,
}

impl Default for MockElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            displayed: true,
            attributes: HashMap::new(),
            appears_after: 0,
            click_failure: None,
            type_failure: None,
        }
    }
}

impl MockElement {
    /// A displayed element with no text
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A displayed element with text
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the displayed flag
    #[must_use]
    pub const fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Miss the first `lookups` lookups
    #[must_use]
    pub const fn appears_after(mut self, lookups: u32) -> Self {
        self.appears_after = lookups;
        self
    }

    /// Fail clicks with `error`
    #[must_use]
    pub fn failing_click(mut self, error: DriverError) -> Self {
        self.click_failure = Some(error);
        self
    }

    /// Fail clear/send_keys with `error`
    #[must_use]
    pub fn failing_type(mut self, error: DriverError) -> Self {
        self.type_failure = Some(error);
        self
    }
}

#[derive(Debug)]
struct MockState {
    elements: HashMap<Locator, MockElement>,
    lookups: HashMap<Locator, u32>,
    issued: HashMap<ElementId, Locator>,
    values: HashMap<Locator, String>,
    calls: Vec<DriverCall>,
    gestures: Vec<GestureSequence>,
    window: Viewport,
    find_failure: Option<DriverError>,
    gesture_failure: Option<DriverError>,
    keyboard_failure: Option<DriverError>,
    quit_count: u32,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            lookups: HashMap::new(),
            issued: HashMap::new(),
            values: HashMap::new(),
            calls: Vec::new(),
            gestures: Vec::new(),
            window: Viewport::new(1080, 2340),
            find_failure: None,
            gesture_failure: None,
            keyboard_failure: None,
            quit_count: 0,
        }
    }
}

impl MockState {
    fn ensure_open(&self) -> DriverResult<()> {
        if self.quit_count > 0 {
            Err(DriverError::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Resolve an issued id back to a live element
    fn live(&self, id: &ElementId) -> DriverResult<(Locator, &MockElement)> {
        self.ensure_open()?;
        let locator = self.issued.get(id).ok_or(DriverError::StaleElement)?;
        let element = self
            .elements
            .get(locator)
            .ok_or(DriverError::StaleElement)?;
        Ok((locator.clone(), element))
    }
}

/// In-memory [`MobileDriver`].
///
/// Clones share state, so a test can keep one handle for inspection while a
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    /// Empty screen, 1080x2340 window
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an element (builder form)
    #[must_use]
    pub fn with_element(self, locator: Locator, element: MockElement) -> Self {
        self.add_element(locator, element);
        self
    }

    /// Set the window size (builder form)
    #[must_use]
    pub fn with_window_size(self, viewport: Viewport) -> Self {
        self.state().window = viewport;
        self
    }

    /// Put an element on screen
    pub fn add_element(&self, locator: Locator, element: MockElement) {
        let mut state = self.state();
        let _ = state.lookups.remove(&locator);
        let _ = state.elements.insert(locator, element);
    }

    /// Take an element off screen; handles issued for it go stale
    pub fn remove_element(&self, locator: &Locator) {
        let _ = self.state().elements.remove(locator);
    }

    /// Fail every lookup with `error`
    pub fn fail_finds(&self, error: DriverError) {
        self.state().find_failure = Some(error);
    }

    /// Fail every gesture with `error`
    pub fn fail_gestures(&self, error: DriverError) {
        self.state().gesture_failure = Some(error);
    }

    /// Fail keyboard dismissal with `error`
    pub fn fail_hide_keyboard(&self, error: DriverError) {
        self.state().keyboard_failure = Some(error);
    }

    /// All calls so far
    #[must_use]
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state().calls.clone()
    }

    /// All gestures performed
    #[must_use]
    pub fn gestures(&self) -> Vec<GestureSequence> {
        self.state().gestures.clone()
    }

    /// Number of clicks received by the element at `locator`
    #[must_use]
    pub fn clicks_on(&self, locator: &Locator) -> usize {
        self.count(|call| matches!(call, DriverCall::Click(l) if l == locator))
    }

    /// Number of lookups for `locator`
    #[must_use]
    pub fn finds_for(&self, locator: &Locator) -> usize {
        self.count(|call| matches!(call, DriverCall::Find(l) if l == locator))
    }

    /// Current value typed into `locator`, if it was ever cleared or typed into
    #[must_use]
    pub fn typed_text(&self, locator: &Locator) -> Option<String> {
        self.state().values.get(locator).cloned()
    }

    /// Number of `quit` calls
    #[must_use]
    pub fn quit_count(&self) -> u32 {
        self.state().quit_count
    }

    fn count(&self, pred: impl Fn(&DriverCall) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }
}

impl MobileDriver for MockDriver {
    fn find_element(&self, locator: &Locator) -> DriverResult<Option<ElementId>> {
        let mut state = self.state();
        state.ensure_open()?;
        state.calls.push(DriverCall::Find(locator.clone()));
        if let Some(err) = state.find_failure.clone() {
            return Err(err);
        }
        let Some(appears_after) = state.elements.get(locator).map(|e| e.appears_after) else {
            return Ok(None);
        };
        let seen = state.lookups.entry(locator.clone()).or_insert(0);
        *seen += 1;
        if *seen <= appears_after {
            return Ok(None);
        }
        let id = ElementId::new(format!("mock-{}", Uuid::new_v4()));
        let _ = state.issued.insert(id.clone(), locator.clone());
        Ok(Some(id))
    }

    fn click(&self, element: &ElementId) -> DriverResult<()> {
        let mut state = self.state();
        let (locator, el) = state.live(element)?;
        let failure = el.click_failure.clone();
        state.calls.push(DriverCall::Click(locator));
        failure.map_or(Ok(()), Err)
    }

    fn clear(&self, element: &ElementId) -> DriverResult<()> {
        let mut state = self.state();
        let (locator, el) = state.live(element)?;
        let failure = el.type_failure.clone();
        state.calls.push(DriverCall::Clear(locator.clone()));
        if let Some(err) = failure {
            return Err(err);
        }
        let _ = state.values.insert(locator, String::new());
        Ok(())
    }

    fn send_keys(&self, element: &ElementId, text: &str) -> DriverResult<()> {
        let mut state = self.state();
        let (locator, el) = state.live(element)?;
        let failure = el.type_failure.clone();
        state
            .calls
            .push(DriverCall::SendKeys(locator.clone(), text.to_string()));
        if let Some(err) = failure {
            return Err(err);
        }
        state.values.entry(locator).or_default().push_str(text);
        Ok(())
    }

    fn text(&self, element: &ElementId) -> DriverResult<String> {
        let mut state = self.state();
        let (locator, el) = state.live(element)?;
        let text = el.text.clone();
        state.calls.push(DriverCall::Text(locator));
        Ok(text)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> DriverResult<Option<String>> {
        let mut state = self.state();
        let (locator, el) = state.live(element)?;
        let value = el.attributes.get(name).cloned();
        state
            .calls
            .push(DriverCall::Attribute(locator, name.to_string()));
        Ok(value)
    }

    fn is_displayed(&self, element: &ElementId) -> DriverResult<bool> {
        let mut state = self.state();
        let (locator, el) = state.live(element)?;
        let displayed = el.displayed;
        state.calls.push(DriverCall::IsDisplayed(locator));
        Ok(displayed)
    }

    fn window_size(&self) -> DriverResult<Viewport> {
        let mut state = self.state();
        state.ensure_open()?;
        state.calls.push(DriverCall::WindowSize);
        Ok(state.window)
    }

    fn perform_gesture(&self, gesture: &GestureSequence) -> DriverResult<()> {
        let mut state = self.state();
        state.ensure_open()?;
        state.calls.push(DriverCall::Gesture(gesture.name));
        if let Some(err) = state.gesture_failure.clone() {
            return Err(err);
        }
        state.gestures.push(gesture.clone());
        Ok(())
    }

    fn hide_keyboard(&self) -> DriverResult<()> {
        let mut state = self.state();
        state.ensure_open()?;
        state.calls.push(DriverCall::HideKeyboard);
        state.keyboard_failure.clone().map_or(Ok(()), Err)
    }

    fn quit(&self) -> DriverResult<()> {
        let mut state = self.state();
        state.ensure_open()?;
        state.calls.push(DriverCall::Quit);
        state.quit_count += 1;
        Ok(())
    }
}
