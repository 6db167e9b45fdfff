//! Wavrot CLI - deliberate audio decay
//!
//! Command-line interface for the Wavrot degradation pipeline.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use wavrot::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Degrade {
            input,
            config,
            seed,
        } => commands::degrade(&input, config.as_deref(), seed)?,
        Commands::ExampleConfig { path } => commands::example_config(path.as_deref())?,
    }

    Ok(())
}
