//! Google Indexing API submission.
//!
//! Authenticates as a service account (see [`token`]) and then notifies the
//! Indexing API about each URL in turn. URLs come from route discovery or
//! from an explicit list.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pingroute_core::google::{GoogleOptions, NotificationType, submit};
//! use pingroute_core::Notifier;
//!
//! # async fn example() -> pingroute_core::Result<()> {
//! let mut options = GoogleOptions::new("https://example.com", "service-account.json", ".next");
//! options.notification_type = NotificationType::UrlUpdated;
//!
//! let report = submit(&Notifier::new()?, &options).await?;
//! for entry in &report.responses {
//!     println!("{} -> {}", entry.url, entry.result.status);
//! }
//! # Ok(())
//! # }
//! ```

mod submit;
pub mod token;

pub use submit::{
    GoogleOptions, GoogleReport, INDEXING_ENDPOINT, NotificationType, UrlSubmission,
    resolve_explicit_urls, submit,
};
pub use token::{AccessToken, ServiceAccountCredential, issue_token};
