//! CLI command definitions using clap

use bankprobe::pages::PageKind;
use bankprobe::{Direction, Platform};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bankprobe: page objects and smoke flows for the Digital Bank mobile app
#[derive(Parser, Debug)]
#[command(name = "bankprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, env = "BANKPROBE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Target platform (android, ios); overrides the configuration
    #[arg(long, global = true)]
    pub platform: Option<Platform>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the locators of a page for the active platform
    Locators(LocatorsArgs),

    /// Resolve one element name of a page
    Resolve(ResolveArgs),

    /// Show the capabilities a new session would request
    Capabilities,

    /// Compute swipe coordinates for a screen size
    Swipe(SwipeArgs),

    /// Show the effective configuration
    Config,

    /// Run a smoke flow against a live Appium server
    Smoke(SmokeArgs),
}

/// Arguments for the locators command
#[derive(Parser, Debug)]
pub struct LocatorsArgs {
    /// Page (login, sign-up, deposit, atm, location, account-summary)
    #[arg(short, long)]
    pub page: PageKind,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Page (login, sign-up, deposit, atm, location, account-summary)
    #[arg(short, long)]
    pub page: PageKind,

    /// Symbolic element name
    pub name: String,
}

/// Arguments for the swipe command
#[derive(Parser, Debug)]
pub struct SwipeArgs {
    /// Direction the finger travels (up, down, left, right)
    #[arg(short, long, default_value = "up")]
    pub direction: Direction,

    /// Screen width in pixels
    #[arg(long, default_value = "1080")]
    pub width: u32,

    /// Screen height in pixels
    #[arg(long, default_value = "2340")]
    pub height: u32,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the smoke command
#[derive(Parser, Debug)]
pub struct SmokeArgs {
    /// Flow to run
    #[arg(long, default_value = "login")]
    pub flow: SmokeFlow,
}

/// Output format for inspection commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Smoke flows
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmokeFlow {
    /// Sign in with the configured credentials
    Login,
    /// Locate the nearest ATM by GPS
    Location,
}

impl SmokeFlow {
    /// Flow name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Location => "location",
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_locators() {
        let cli = Cli::parse_from(["bankprobe", "locators", "--page", "login", "-f", "json"]);
        match cli.command {
            Commands::Locators(args) => {
                assert_eq!(args.page, PageKind::Login);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "bankprobe",
            "resolve",
            "--page",
            "account-summary",
            "picker_wheel",
            "--platform",
            "iOS",
            "-vv",
        ]);
        assert_eq!(cli.platform, Some(Platform::Ios));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.page, PageKind::AccountSummary);
                assert_eq!(args.name, "picker_wheel");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_swipe_defaults() {
        let cli = Cli::parse_from(["bankprobe", "swipe"]);
        match cli.command {
            Commands::Swipe(args) => {
                assert_eq!(args.direction, Direction::Up);
                assert_eq!((args.width, args.height), (1080, 2340));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_page_and_platform() {
        assert!(Cli::try_parse_from(["bankprobe", "locators", "--page", "checkout"]).is_err());
        assert!(
            Cli::try_parse_from(["bankprobe", "config", "--platform", "windows"]).is_err()
        );
    }

    #[test]
    fn test_smoke_flow_names() {
        assert_eq!(SmokeFlow::Login.as_str(), "login");
        assert_eq!(SmokeFlow::Location.as_str(), "location");
    }
}
