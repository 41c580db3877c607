//! `pingroute google`: notify the Google Indexing API one URL at a time.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use colored::Colorize;
use pingroute_core::google::{self, GoogleOptions, GoogleReport};
use pingroute_core::Notifier;

use super::{failure_detail, outcome};
use crate::cli::GoogleArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, print_json};
use crate::utils::settings::Settings;

pub async fn execute(args: &GoogleArgs, settings: &Settings) -> Result<()> {
    let base_url = settings.require_base_url(&args.site)?;
    let credential_path = settings.service_account(args.service_account.as_deref());

    // A dry run never reads the credential, so it may be absent.
    let credential_path = match credential_path {
        Some(path) => path,
        None if args.dry_run => PathBuf::new(),
        None => {
            return Err(CliError::usage(anyhow!(
                "missing service account: pass --service-account, set GOOGLE_APPLICATION_CREDENTIALS or add [google] service_account to pingroute.toml"
            ))
            .into());
        },
    };

    let mut options =
        GoogleOptions::new(base_url, credential_path, settings.build_dir(&args.site));
    if !args.urls.is_empty() {
        options.urls = Some(args.urls.clone());
    }
    options.notification_type = args.kind.into();
    options.filter = settings.filter(&args.filter)?;
    options.dry_run = args.dry_run;
    if let Some(endpoint) = &args.endpoint {
        options.endpoint.clone_from(endpoint);
    }

    let report = google::submit(&Notifier::new()?, &options).await?;

    match args.format.resolve() {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::network(anyhow!(
            "{failed} of {} URLs were not accepted by the Indexing API",
            report.responses.len()
        ))
        .into());
    }
    Ok(())
}

fn print_text(report: &GoogleReport) {
    if report.dry_run {
        println!(
            "{} {} URLs would be submitted as {}",
            "Dry run:".bold(),
            report.urls.len(),
            report.notification_type
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
        "Submitted {} URLs as {}",
        report.responses.len(),
        report.notification_type
    );
    for entry in &report.responses {
        let (marker, status) = outcome(&entry.result);
        println!("{marker} {} {}", entry.url, status.bright_black());
        if let Some(detail) = failure_detail(&entry.result) {
            println!("{detail}");
        }
    }
}
