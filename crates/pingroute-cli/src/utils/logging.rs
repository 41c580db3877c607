//! Logging initialization and configuration.
//!
//! Sets up the tracing subscriber and color control based on CLI flags and
//! environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands, KeyCommands};
use crate::utils::cli_args::FormatArg;

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs go to stderr. Info logs are suppressed when the selected command
/// emits JSON so that stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let mut level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let machine_output = command_format(&cli.command).resolve().is_machine();
    if machine_output && !cli.verbose {
        level = Level::ERROR;
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

fn command_format(command: &Commands) -> &FormatArg {
    match command {
        Commands::Routes(args) => &args.format,
        Commands::Indexnow(args) => &args.format,
        Commands::Google(args) => &args.format,
        Commands::Key {
            command: KeyCommands::Generate { format, .. } | KeyCommands::Location { format, .. },
        } => format,
    }
}
