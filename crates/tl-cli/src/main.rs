use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{daily, record, weekly};
use tl_cli::{Cli, Commands, Config};

/// Loads configuration for the current invocation.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Some(Commands::Record { description }) => {
            let config = load_config(cli.config.as_deref())?;
            record::run(&config, &description.join(" "))?;
        }
        Some(Commands::Daily { date, json }) => {
            let config = load_config(cli.config.as_deref())?;
            daily::run(&config, &mut stdout, *date, *json)?;
        }
        Some(Commands::Weekly { date, json }) => {
            let config = load_config(cli.config.as_deref())?;
            weekly::run(&config, &mut stdout, *date, *json)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
