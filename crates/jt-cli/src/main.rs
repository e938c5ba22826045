use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jt_cli::commands::{gaps, init, parse, place};
use jt_cli::{Cli, Commands, Config};

/// Load and validate config.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Parse(args)) => parse::run(&mut out, args)?,
        Some(Commands::Place(args)) => {
            let config = load_config(cli.config.as_deref())?;
            place::run(&mut out, args, &config)?;
        }
        Some(Commands::Gaps(args)) => {
            let config = load_config(cli.config.as_deref())?;
            gaps::run(&mut out, args, &config)?;
        }
        Some(Commands::Init { force }) => {
            init::run(&mut out, cli.config.as_deref(), *force)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    out.flush()?;
    Ok(())
}
