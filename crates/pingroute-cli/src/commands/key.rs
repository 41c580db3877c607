//! `pingroute key`: create IndexNow keys and show where they must be hosted.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use colored::Colorize;
use pingroute_core::key::{default_key_location, generate_key, validate_key, write_key_file};
use pingroute_core::SiteUrl;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{OutputFormat, print_json};
use crate::utils::cli_args::{FormatArg, SiteArgs};
use crate::utils::settings::Settings;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedKey {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyLocation {
    key: String,
    key_location: String,
}

pub async fn generate(public_dir: Option<&Path>, format: &FormatArg) -> Result<()> {
    let key = generate_key();
    let path = match public_dir {
        Some(dir) => Some(write_key_file(dir, &key).await?),
        None => None,
    };

    match format.resolve() {
        OutputFormat::Text => {
            println!("{key}");
            if let Some(path) = &path {
                println!("{} {}", "Wrote".green(), path.display());
            }
        },
        OutputFormat::Json => print_json(&GeneratedKey { key, path })?,
    }
    Ok(())
}

pub fn location(
    base_url: Option<&str>,
    key: Option<&str>,
    format: &FormatArg,
    settings: &Settings,
) -> Result<()> {
    let site_args = SiteArgs {
        base_url: base_url.map(str::to_string),
        build_dir: None,
    };
    let site = SiteUrl::parse(&settings.require_base_url(&site_args)?)?;
    let key = settings.indexnow_key(key).ok_or_else(|| {
        CliError::usage(anyhow!("missing IndexNow key: pass --key or set INDEXNOW_KEY"))
    })?;
    validate_key(&key)?;

    let key_location = settings
        .key_location(None)
        .unwrap_or_else(|| default_key_location(&site, &key));

    match format.resolve() {
        OutputFormat::Text => println!("{key_location}"),
        OutputFormat::Json => print_json(&KeyLocation { key, key_location })?,
    }
    Ok(())
}
