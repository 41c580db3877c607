//! pingroute CLI - notify search engines about the routes in a build
//!
//! This is the library behind the `pingroute` binary. Command
//! implementations live in separate modules; [`run`] parses arguments and
//! dispatches to them.
use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use crate::utils::initialize_logging;
use crate::utils::settings::Settings;
use cli::{Cli, Commands, KeyCommands};

/// Execute the pingroute CLI with the current arguments and environment.
///
/// # Errors
///
/// Returns an error if configuration loading or command execution fails,
/// including when a submission completes but some destination rejected it.
/// Use [`error::exit_code_from_error`] to map the error to an exit code.
pub async fn run() -> Result<()> {
    // Convert Broken pipe panics into a clean exit
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe") || msg.contains("broken pipe") {
            std::process::exit(0);
        }
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("Effective settings: {settings:?}");

    execute_command(cli, &settings).await
}

async fn execute_command(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Commands::Routes(args) => commands::list_routes(&args, settings).await,
        Commands::Indexnow(args) => commands::submit_indexnow(&args, settings).await,
        Commands::Google(args) => commands::submit_google(&args, settings).await,
        Commands::Key { command } => match command {
            KeyCommands::Generate { public_dir, format } => {
                commands::generate_key(public_dir.as_deref(), &format).await
            },
            KeyCommands::Location {
                base_url,
                key,
                format,
            } => commands::key_location(base_url.as_deref(), key.as_deref(), &format, settings),
        },
    }
}
