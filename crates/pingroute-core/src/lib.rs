//! # pingroute-core
//!
//! Core functionality for pingroute - tell search engines which pages a site
//! has just published.
//!
//! Routes are read from a web framework's build manifests, normalized into a
//! canonical set, mapped onto the site's base URL and submitted to IndexNow
//! endpoints or the Google Indexing API.
//!
//! ## Architecture
//!
//! - **Discovery**: manifest readers ([`manifest`]) feeding the route
//!   normalizer ([`routes`])
//! - **Mapping**: base URL normalization ([`site`]) and URL filters ([`filter`])
//! - **Submission**: concurrent IndexNow fan-out ([`indexnow`]) and sequential
//!   Google notifications with service-account auth ([`google`])
//! - **Support**: IndexNow keys ([`key`]), configuration ([`config`]) and
//!   categorized errors ([`error`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use pingroute_core::{RouteRules, discover_routes};
//! use std::path::Path;
//!
//! # async fn example() {
//! let routes = discover_routes(Path::new(".next"), &RouteRules::default()).await;
//! for route in &routes {
//!     println!("{route}");
//! }
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Invalid input fails before any network request. Once submission starts,
//! per-destination failures are data in the returned report:
//!
//! ```no_run
//! use pingroute_core::indexnow::{IndexNowOptions, submit};
//! use pingroute_core::{Error, Notifier};
//!
//! # async fn example() -> pingroute_core::Result<()> {
//! let options = IndexNowOptions::new("https://example.com", "0f3c9a7d2b6e4f1a", ".next");
//! match submit(&Notifier::new()?, &options).await {
//!     Ok(report) if report.all_ok() => println!("submitted {} URLs", report.urls.len()),
//!     Ok(report) => eprintln!("{} endpoints failed", report.failures().count()),
//!     Err(Error::InvalidKey(msg)) => eprintln!("bad key: {msg}"),
//!     Err(e) => eprintln!("{} error: {e}", e.category()),
//! }
//! # Ok(())
//! # }
//! ```

/// Configuration read from `pingroute.toml`
pub mod config;
/// Error types and result aliases
pub mod error;
/// URL filters applied before submission
pub mod filter;
pub mod google;
pub mod indexnow;
/// IndexNow key validation, generation and key files
pub mod key;
/// Build manifest readers
pub mod manifest;
/// HTTP client for submissions
pub mod notifier;
/// Route normalization and discovery
pub mod routes;
/// Site base URL handling
pub mod site;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use filter::UrlFilter;
pub use google::{GoogleOptions, GoogleReport, NotificationType, UrlSubmission};
pub use indexnow::{IndexNowOptions, IndexNowReport};
pub use key::{generate_key, validate_key};
pub use notifier::{Notifier, SubmissionResult};
pub use routes::{RouteRules, RouteSet, discover_routes};
pub use site::SiteUrl;
