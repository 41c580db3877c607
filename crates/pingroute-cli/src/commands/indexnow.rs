//! `pingroute indexnow`: fan the discovered URLs out to IndexNow endpoints.

use anyhow::{Result, anyhow};
use colored::Colorize;
use pingroute_core::indexnow::{self, IndexNowOptions, IndexNowReport};
use pingroute_core::Notifier;

use super::{failure_detail, outcome};
use crate::cli::IndexNowArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, print_json};
use crate::utils::settings::Settings;

pub async fn execute(args: &IndexNowArgs, settings: &Settings) -> Result<()> {
    let base_url = settings.require_base_url(&args.site)?;
    let key = settings.indexnow_key(args.key.as_deref()).ok_or_else(|| {
        CliError::usage(anyhow!(
            "missing IndexNow key: pass --key, set INDEXNOW_KEY or add [indexnow] key to pingroute.toml (create one with `pingroute key generate`)"
        ))
    })?;

    let mut options = IndexNowOptions::new(base_url, key, settings.build_dir(&args.site));
    options.key_location = settings.key_location(args.key_location.as_deref());
    options.endpoints = settings.endpoints(&args.endpoints);
    options.filter = settings.filter(&args.filter)?;
    options.dry_run = args.dry_run;

    let report = indexnow::submit(&Notifier::new()?, &options).await?;

    match args.format.resolve() {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    if report.urls.is_empty() && !report.dry_run {
        return Err(CliError::network(anyhow!(
            "no URLs to submit; nothing was sent to {} IndexNow endpoints",
            report.responses.len()
        ))
        .into());
    }

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::network(anyhow!(
            "{failed} of {} IndexNow endpoints did not accept the submission",
            report.responses.len()
        ))
        .into());
    }
    Ok(())
}

fn print_text(report: &IndexNowReport) {
    if report.dry_run {
        println!(
            "{} {} URLs would be submitted (key file: {})",
            "Dry run:".bold(),
            report.urls.len(),
            report.key_location
        );
        for url in &report.urls {
            println!("  {url}");
        }
        return;
    }

    if report.urls.is_empty() {
        println!("No URLs to submit.");
        return;
    }

    println!(
        "Submitted {} URLs to {} endpoints",
        report.urls.len(),
        report.responses.len()
    );
    for (endpoint, result) in &report.responses {
        let (marker, status) = outcome(result);
        println!("{marker} {endpoint} {}", status.bright_black());
        if let Some(detail) = failure_detail(result) {
            println!("{detail}");
        }
    }
}
