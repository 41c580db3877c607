//! `pingroute routes`: show what discovery finds.
//!
//! Without a base URL the canonical routes are listed; with one, the
//! absolute URLs that a submission would send.

use anyhow::Result;
use pingroute_core::filter::apply_filter;
use pingroute_core::indexnow::discover_urls;
use pingroute_core::{RouteRules, SiteUrl, discover_routes};
use tracing::warn;

use crate::cli::RoutesArgs;
use crate::output::{OutputFormat, print_json};
use crate::utils::settings::Settings;

pub async fn execute(args: &RoutesArgs, settings: &Settings) -> Result<()> {
    let build_dir = settings.build_dir(&args.site);
    let filter = settings.filter(&args.filter)?;
    let rules = RouteRules::default();

    let entries = match settings.base_url(&args.site) {
        Some(base_url) => {
            let site = SiteUrl::parse(&base_url)?;
            discover_urls(&site, &build_dir, &rules, filter.as_ref()).await
        },
        None => apply_filter(discover_routes(&build_dir, &rules).await, filter.as_ref()),
    };

    if entries.is_empty() {
        warn!("No routes found in {}", build_dir.display());
    }

    match args.format.resolve() {
        OutputFormat::Text => {
            for entry in &entries {
                println!("{entry}");
            }
        },
        OutputFormat::Json => print_json(&entries)?,
    }
    Ok(())
}
