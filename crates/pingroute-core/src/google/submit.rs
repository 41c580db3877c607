use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::token::issue_token;
use crate::filter::{UrlFilter, apply_filter};
use crate::indexnow::discover_urls;
use crate::notifier::{Notifier, SubmissionResult};
use crate::routes::RouteRules;
use crate::site::{SiteUrl, parse_http_url};
use crate::Result;

/// Indexing API notification endpoint.
pub const INDEXING_ENDPOINT: &str =
    "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// What a notification tells Google about a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// The page was added or changed
    #[default]
    UrlUpdated,
    /// The page was removed
    UrlDeleted,
}

impl NotificationType {
    /// Wire name of the notification type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UrlUpdated => "URL_UPDATED",
            Self::UrlDeleted => "URL_DELETED",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for a Google Indexing API submission.
#[derive(Debug, Clone)]
pub struct GoogleOptions {
    /// Public base URL of the site
    pub base_url: String,
    /// Path to the service-account JSON key file
    pub credential_path: PathBuf,
    /// Framework build directory holding the manifests
    pub build_dir: PathBuf,
    /// Route exclusion rules
    pub rules: RouteRules,
    /// Submit these URLs instead of discovering routes
    pub urls: Option<Vec<String>>,
    /// Notification type sent with every URL
    pub notification_type: NotificationType,
    /// Optional predicate over absolute URLs
    pub filter: Option<UrlFilter>,
    /// Resolve URLs only, without reading the credential or any request
    pub dry_run: bool,
    /// Notification endpoint, [`INDEXING_ENDPOINT`] unless overridden
    pub endpoint: String,
}

impl GoogleOptions {
    /// Options with defaults for everything but the required inputs.
    pub fn new(
        base_url: impl Into<String>,
        credential_path: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credential_path: credential_path.into(),
            build_dir: build_dir.into(),
            rules: RouteRules::default(),
            urls: None,
            notification_type: NotificationType::default(),
            filter: None,
            dry_run: false,
            endpoint: INDEXING_ENDPOINT.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Notification<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    kind: NotificationType,
}

/// Outcome for one submitted URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlSubmission {
    /// The submitted URL
    pub url: String,
    /// Response status, acceptance and body
    #[serde(flatten)]
    pub result: SubmissionResult,
}

/// Result of a Google Indexing API submission.
#[derive(Debug, Clone, Serialize)]
pub struct GoogleReport {
    /// URLs that were (or, in a dry run, would be) submitted
    pub urls: Vec<String>,
    /// Notification type sent with every URL
    pub notification_type: NotificationType,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// One entry per URL in submission order; empty for dry runs
    pub responses: Vec<UrlSubmission>,
}

impl GoogleReport {
    /// Submissions Google did not accept.
    pub fn failures(&self) -> impl Iterator<Item = &UrlSubmission> {
        self.responses.iter().filter(|entry| !entry.result.ok)
    }

    /// Whether every URL was accepted.
    pub fn all_ok(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Validate and deduplicate an explicit URL list.
///
/// Fails on the first entry that is not an absolute http(s) URL. Entries
/// are trimmed, duplicates dropped (first occurrence kept) and the filter
/// applied last.
pub fn resolve_explicit_urls(urls: &[String], filter: Option<&UrlFilter>) -> Result<Vec<String>> {
    let mut resolved: Vec<String> = Vec::with_capacity(urls.len());
    for raw in urls {
        let url = raw.trim();
        parse_http_url(url)?;
        if !resolved.iter().any(|seen| seen == url) {
            resolved.push(url.to_string());
        }
    }
    Ok(apply_filter(resolved, filter))
}

/// Notify the Indexing API about every URL, one request at a time.
///
/// Fails only on invalid input or when no access token can be obtained.
/// Per-URL failures, including transport errors, are recorded in
/// [`GoogleReport::responses`] and the remaining URLs are still sent.
pub async fn submit(notifier: &Notifier, options: &GoogleOptions) -> Result<GoogleReport> {
    let site = SiteUrl::parse(&options.base_url)?;
    let urls = match &options.urls {
        Some(explicit) => resolve_explicit_urls(explicit, options.filter.as_ref())?,
        None => {
            discover_urls(
                &site,
                &options.build_dir,
                &options.rules,
                options.filter.as_ref(),
            )
            .await
        },
    };

    let mut report = GoogleReport {
        urls,
        notification_type: options.notification_type,
        dry_run: options.dry_run,
        responses: Vec::new(),
    };

    if options.dry_run {
        info!(
            "Dry run: {} URLs would be submitted to the Indexing API",
            report.urls.len()
        );
        return Ok(report);
    }

    let token = issue_token(notifier, &options.credential_path).await?;

    report.responses.reserve(report.urls.len());
    for url in &report.urls {
        let notification = Notification {
            url,
            kind: options.notification_type,
        };
        let result = notifier
            .post_json(&options.endpoint, &notification, Some(token.secret()))
            .await;
        debug!("{} {} -> {}", options.notification_type, url, result.status);
        report.responses.push(UrlSubmission {
            url: url.clone(),
            result,
        });
    }

    info!(
        "Submitted {} URLs to the Indexing API ({} failed)",
        report.responses.len(),
        report.failures().count()
    );
    Ok(report)
}
