//! Bankprobe CLI library
//!
//! Command-line front end for the Bankprobe page-object suite: inspect
//! locator tables, preview capabilities and swipe plans, and run smoke flows
//! against a live Appium server.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;

pub use commands::{
    Cli, ColorArg, Commands, LocatorsArgs, OutputFormat, ResolveArgs, SmokeArgs, SmokeFlow,
    SwipeArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
