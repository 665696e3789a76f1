//! Bankprobe CLI: page-object tooling for the Digital Bank mobile app
//!
//! ## Usage
//!
//! ```bash
//! bankprobe locators --page login             # Locator table for the active platform
//! bankprobe resolve --page atm switch_on      # One resolved locator
//! bankprobe swipe --direction up              # Swipe coordinates
//! bankprobe --platform android smoke --flow login
//! ```

use bankprobe::Viewport;
use bankprobe_cli::{
    handlers, Cli, CliConfig, CliResult, ColorChoice, Commands, SmokeArgs, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    console::set_colors_enabled(config.color.should_color());

    let output = match cli.command {
        Commands::Locators(args) => {
            let platform = config.effective_config()?.platform;
            handlers::render_locators(args.page, platform, args.format)?
        }
        Commands::Resolve(args) => {
            let platform = config.effective_config()?.platform;
            handlers::render_resolved(args.page, platform, &args.name)?
        }
        Commands::Capabilities => handlers::render_capabilities(&config.effective_config()?)?,
        Commands::Swipe(args) => handlers::render_swipe(
            args.direction,
            Viewport::new(args.width, args.height),
            args.format,
        )?,
        Commands::Config => handlers::render_config(&config.effective_config()?)?,
        Commands::Smoke(args) => run_smoke(&config, &args)?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.into();

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
        .with_json_logs(cli.json_logs)
        .with_config_path(cli.config.clone())
        .with_platform(cli.platform)
}

fn run_smoke(config: &CliConfig, args: &SmokeArgs) -> CliResult<String> {
    let settings = config.effective_config()?;
    bankprobe::logging::init(&config.logging().with_log_dir(&settings.logs_dir))?;
    if config.verbosity.is_verbose() {
        eprintln!(
            "Running {} smoke flow on {} via {}",
            args.flow.as_str(),
            settings.platform,
            settings.appium_server_url
        );
    }
    handlers::execute_smoke(&settings, args.flow)
}
