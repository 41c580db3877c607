//! IndexNow fan-out submission.
//!
//! IndexNow lets a site tell participating search engines that URLs changed.
//! One JSON payload is built from the discovered URLs and POSTed to every
//! configured endpoint at once:
//!
//! ```json
//! {
//!   "host": "example.com",
//!   "key": "0f3c9a7d2b6e4f1a8c5d9e7b3a1f6c2d",
//!   "keyLocation": "https://example.com/0f3c9a7d2b6e4f1a8c5d9e7b3a1f6c2d.txt",
//!   "urlList": ["https://example.com", "https://example.com/about"]
//! }
//! ```
//!
//! Endpoints are independent. A refused connection at one endpoint is
//! recorded in the report and never prevents the others from completing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pingroute_core::indexnow::{IndexNowOptions, submit};
//! use pingroute_core::Notifier;
//!
//! # async fn example() -> pingroute_core::Result<()> {
//! let options = IndexNowOptions::new("https://example.com", "0f3c9a7d2b6e4f1a", ".next");
//! let report = submit(&Notifier::new()?, &options).await?;
//!
//! for (endpoint, result) in &report.responses {
//!     println!("{endpoint}: {} ok={}", result.status, result.ok);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::filter::{UrlFilter, apply_filter};
use crate::key::{default_key_location, validate_key};
use crate::notifier::{Notifier, SubmissionResult};
use crate::routes::{RouteRules, discover_routes};
use crate::site::{SiteUrl, parse_http_url};
use crate::Result;

/// Endpoints notified when the caller does not supply a list.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.indexnow.org/indexnow",
    "https://www.bing.com/indexnow",
    "https://yandex.com/indexnow",
    "https://search.seznam.cz/indexnow",
];

/// Body recorded for every endpoint when there is nothing to submit.
pub const NO_URLS_REASON: &str = "no URLs to submit";

/// Inputs for an IndexNow submission.
#[derive(Debug, Clone)]
pub struct IndexNowOptions {
    /// Public base URL of the site
    pub base_url: String,
    /// IndexNow key
    pub key: String,
    /// Explicit key file URL; defaults to `<base>/<key>.txt`
    pub key_location: Option<String>,
    /// Endpoints to notify; defaults to [`DEFAULT_ENDPOINTS`]
    pub endpoints: Option<Vec<String>>,
    /// Framework build directory holding the manifests
    pub build_dir: PathBuf,
    /// Route exclusion rules
    pub rules: RouteRules,
    /// Optional predicate over absolute URLs
    pub filter: Option<UrlFilter>,
    /// Discover and filter only, without any network request
    pub dry_run: bool,
}

impl IndexNowOptions {
    /// Options with defaults for everything but the required inputs.
    pub fn new(
        base_url: impl Into<String>,
        key: impl Into<String>,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            key: key.into(),
            key_location: None,
            endpoints: None,
            build_dir: build_dir.into(),
            rules: RouteRules::default(),
            filter: None,
            dry_run: false,
        }
    }

    /// Requested endpoints with duplicates collapsed, first occurrence kept.
    pub fn resolved_endpoints(&self) -> Vec<String> {
        let requested: Vec<String> = self.endpoints.clone().unwrap_or_else(|| {
            DEFAULT_ENDPOINTS
                .iter()
                .map(|endpoint| (*endpoint).to_string())
                .collect()
        });

        let mut endpoints: Vec<String> = Vec::with_capacity(requested.len());
        for endpoint in requested {
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }
        endpoints
    }
}

/// The request body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexNowPayload {
    /// Site host name
    pub host: String,
    /// IndexNow key
    pub key: String,
    /// Absolute URL of the key file
    pub key_location: String,
    /// Absolute URLs being announced
    pub url_list: Vec<String>,
}

/// Result of an IndexNow submission.
#[derive(Debug, Clone, Serialize)]
pub struct IndexNowReport {
    /// URLs that were (or, in a dry run, would be) submitted
    pub urls: Vec<String>,
    /// Key file location sent in the payload
    pub key_location: String,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// One entry per endpoint, keyed by endpoint URL; empty for dry runs.
    /// An empty URL list records an unsent entry for every endpoint.
    pub responses: BTreeMap<String, SubmissionResult>,
}

impl IndexNowReport {
    /// Endpoints that did not accept the submission.
    pub fn failures(&self) -> impl Iterator<Item = (&String, &SubmissionResult)> {
        self.responses.iter().filter(|(_, result)| !result.ok)
    }

    /// Whether every endpoint accepted the submission.
    pub fn all_ok(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Discover routes, map them onto `site` and apply `filter`.
pub async fn discover_urls(
    site: &SiteUrl,
    build_dir: &Path,
    rules: &RouteRules,
    filter: Option<&UrlFilter>,
) -> Vec<String> {
    let routes = discover_routes(build_dir, rules).await;
    apply_filter(site.absolute_all(&routes), filter)
}

/// Submit the discovered URLs to every IndexNow endpoint concurrently.
///
/// Input validation (base URL, key, key location) happens before any network
/// activity and is the only way this function fails. Endpoint failures are
/// recorded in [`IndexNowReport::responses`].
pub async fn submit(notifier: &Notifier, options: &IndexNowOptions) -> Result<IndexNowReport> {
    let site = SiteUrl::parse(&options.base_url)?;
    validate_key(&options.key)?;
    let key_location = match &options.key_location {
        Some(location) => {
            let location = location.trim();
            parse_http_url(location)?;
            location.to_string()
        },
        None => default_key_location(&site, &options.key),
    };

    let urls = discover_urls(
        &site,
        &options.build_dir,
        &options.rules,
        options.filter.as_ref(),
    )
    .await;

    let mut report = IndexNowReport {
        urls,
        key_location,
        dry_run: options.dry_run,
        responses: BTreeMap::new(),
    };

    if options.dry_run {
        info!("Dry run: {} URLs would be submitted to IndexNow", report.urls.len());
        return Ok(report);
    }
    if report.urls.is_empty() {
        warn!("No URLs to submit to IndexNow");
        let skipped = SubmissionResult::not_sent(NO_URLS_REASON);
        report.responses = options
            .resolved_endpoints()
            .into_iter()
            .map(|endpoint| (endpoint, skipped.clone()))
            .collect();
        return Ok(report);
    }

    let payload = IndexNowPayload {
        host: site.host().to_string(),
        key: options.key.clone(),
        key_location: report.key_location.clone(),
        url_list: report.urls.clone(),
    };

    report.responses = fan_out(notifier, &options.resolved_endpoints(), &payload).await;
    info!(
        "Submitted {} URLs to {} IndexNow endpoints ({} failed)",
        report.urls.len(),
        report.responses.len(),
        report.failures().count()
    );
    Ok(report)
}

/// POST `payload` to every endpoint and wait for all of them.
pub async fn fan_out(
    notifier: &Notifier,
    endpoints: &[String],
    payload: &IndexNowPayload,
) -> BTreeMap<String, SubmissionResult> {
    let requests = endpoints.iter().map(|endpoint| async move {
        let result = notifier.post_json(endpoint, payload, None).await;
        (endpoint.clone(), result)
    });

    join_all(requests).await.into_iter().collect()
}
