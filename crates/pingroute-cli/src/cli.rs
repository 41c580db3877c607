//! # CLI Structure and Argument Parsing
//!
//! ```bash
//! # What would be submitted?
//! pingroute routes --base-url https://example.com
//!
//! # Notify IndexNow endpoints
//! pingroute indexnow --base-url https://example.com --key "$INDEXNOW_KEY"
//!
//! # Notify Google about removed pages
//! pingroute google --url https://example.com/old --type deleted
//!
//! # Create and publish a key file
//! pingroute key generate --public-dir public
//! ```
//!
//! Every value can also come from the environment or `pingroute.toml`;
//! flags win over environment variables, which win over the config file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pingroute_core::NotificationType;

use crate::utils::cli_args::{FilterArgs, FormatArg, SiteArgs};

/// Main CLI structure for the `pingroute` command
#[derive(Parser, Clone, Debug)]
#[command(name = "pingroute")]
#[command(version)]
#[command(
    about = "pingroute - notify search engines about the routes in your build",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file [default: ./pingroute.toml]. Also via `PINGROUTE_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "PINGROUTE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `pingroute` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List the routes (or absolute URLs) found in the build manifests
    Routes(RoutesArgs),

    /// Submit URLs to IndexNow endpoints
    Indexnow(IndexNowArgs),

    /// Submit URLs to the Google Indexing API
    Google(GoogleArgs),

    /// Manage IndexNow keys
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

/// Arguments for `pingroute routes`
#[derive(Args, Clone, Debug)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub format: FormatArg,
}

/// Arguments for `pingroute indexnow`
#[derive(Args, Clone, Debug)]
pub struct IndexNowArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// IndexNow key
    #[arg(long, env = "INDEXNOW_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// URL of the hosted key file [default: <base-url>/<key>.txt]
    #[arg(long, value_name = "URL")]
    pub key_location: Option<String>,

    /// Endpoint to notify instead of the defaults (repeatable)
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoints: Vec<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show what would be submitted without sending anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub format: FormatArg,
}

/// Arguments for `pingroute google`
#[derive(Args, Clone, Debug)]
pub struct GoogleArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Service-account JSON key file
    #[arg(long, value_name = "PATH", env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub service_account: Option<PathBuf>,

    /// Submit this URL instead of discovered routes (repeatable)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Notification type
    #[arg(long = "type", value_enum, default_value_t = NotificationKind::Updated)]
    pub kind: NotificationKind,

    /// Override the Indexing API endpoint
    #[arg(long, value_name = "URL", hide = true, env = "PINGROUTE_GOOGLE_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show what would be submitted without reading credentials or sending anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub format: FormatArg,
}

/// `--type` values for `pingroute google`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NotificationKind {
    /// URL_UPDATED: the page is new or changed
    Updated,
    /// URL_DELETED: the page was removed
    Deleted,
}

impl From<NotificationKind> for NotificationType {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Updated => Self::UrlUpdated,
            NotificationKind::Deleted => Self::UrlDeleted,
        }
    }
}

/// Subcommands for `pingroute key`
#[derive(Subcommand, Clone, Debug)]
pub enum KeyCommands {
    /// Generate a random IndexNow key
    Generate {
        /// Write `<key>.txt` into this directory (e.g. `public`)
        #[arg(long, value_name = "DIR")]
        public_dir: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Print where IndexNow expects the key file
    Location {
        /// Public base URL of the site
        #[arg(long, value_name = "URL", env = "PINGROUTE_BASE_URL")]
        base_url: Option<String>,

        /// IndexNow key
        #[arg(long, env = "INDEXNOW_KEY", hide_env_values = true)]
        key: Option<String>,

        #[command(flatten)]
        format: FormatArg,
    },
}
