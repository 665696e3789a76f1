//! Command handlers
//!
//! Each handler renders its output into a `String` so the text can be
//! asserted without spawning the binary; `main` only prints.

pub mod capabilities;
pub mod config;
pub mod locators;
pub mod smoke;
pub mod swipe;

pub use capabilities::render_capabilities;
pub use config::render_config;
pub use locators::{render_locators, render_resolved};
pub use smoke::{execute_smoke, run_flow};
pub use swipe::render_swipe;
