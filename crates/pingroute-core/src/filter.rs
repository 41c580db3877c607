//! Caller-supplied URL filters.
//!
//! Filters run on absolute URLs after route discovery and mapping, right
//! before submission. The CLI builds them from `--include` / `--exclude`
//! regular expressions; library callers can pass any closure.
//!
//! ```rust
//! use pingroute_core::UrlFilter;
//!
//! let filter = UrlFilter::from_patterns(&["/blog/"], &["/blog/drafts"])?;
//! assert!(filter.allows("https://ex.com/blog/hello"));
//! assert!(!filter.allows("https://ex.com/blog/drafts/wip"));
//! assert!(!filter.allows("https://ex.com/about"));
//! # Ok::<(), pingroute_core::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::{Error, Result};

type Predicate = dyn Fn(&str) -> bool + Send + Sync;

/// Predicate deciding whether an absolute URL is submitted.
#[derive(Clone)]
pub struct UrlFilter {
    predicate: Arc<Predicate>,
}

impl UrlFilter {
    /// Wrap an arbitrary predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Build a filter from include and exclude regular expressions.
    ///
    /// A URL passes when it matches at least one include pattern (or no
    /// include patterns are given) and matches no exclude pattern.
    pub fn from_patterns<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        let include = compile_all(include)?;
        let exclude = compile_all(exclude)?;

        Ok(Self::new(move |url| {
            (include.is_empty() || include.iter().any(|re| re.is_match(url)))
                && !exclude.iter().any(|re| re.is_match(url))
        }))
    }

    /// Whether `url` should be submitted.
    pub fn allows(&self, url: &str) -> bool {
        (self.predicate)(url)
    }

    /// Keep only the URLs this filter allows, preserving order.
    pub fn apply(&self, urls: Vec<String>) -> Vec<String> {
        urls.into_iter().filter(|url| self.allows(url)).collect()
    }
}

impl fmt::Debug for UrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlFilter").finish_non_exhaustive()
    }
}

/// Apply an optional filter.
pub fn apply_filter(urls: Vec<String>, filter: Option<&UrlFilter>) -> Vec<String> {
    match filter {
        Some(filter) => filter.apply(urls),
        None => urls,
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern.as_ref())
                .map_err(|e| Error::Config(format!("invalid filter pattern: {e}")))
        })
        .collect()
}
