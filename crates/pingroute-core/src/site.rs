//! Site base URL handling.
//!
//! Every submitted URL is built as `normalized_base + route`, where the
//! normalized base is the origin plus path of the configured base URL with
//! any trailing slash removed. The root route maps to the bare base.

use std::fmt;

use url::Url;

use crate::routes::ROOT_ROUTE;
use crate::{Error, Result};

/// Validated, normalized site base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    base: String,
    host: String,
}

impl SiteUrl {
    /// Parse and normalize a base URL.
    ///
    /// Accepts `http` and `https` URLs with a host. Query strings and
    /// fragments are dropped.
    ///
    /// ```rust
    /// use pingroute_core::SiteUrl;
    ///
    /// let site = SiteUrl::parse("https://example.com/docs/")?;
    /// assert_eq!(site.as_str(), "https://example.com/docs");
    /// assert_eq!(site.host(), "example.com");
    /// assert_eq!(site.absolute("/"), "https://example.com/docs");
    /// assert_eq!(site.absolute("/intro"), "https://example.com/docs/intro");
    /// # Ok::<(), pingroute_core::Error>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidUrl("base URL is required".to_string()));
        }

        let url = parse_http_url(raw)?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidUrl(format!("'{raw}' has no host")))?
            .to_string();

        let origin = url.origin().ascii_serialization();
        let path = url.path().trim_end_matches('/');

        Ok(Self {
            base: format!("{origin}{path}"),
            host,
        })
    }

    /// The normalized base, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Host name sent as the IndexNow `host` field.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Map a canonical route to its absolute URL.
    pub fn absolute(&self, route: &str) -> String {
        if route == ROOT_ROUTE || route.is_empty() {
            self.base.clone()
        } else if route.starts_with('/') {
            format!("{}{route}", self.base)
        } else {
            format!("{}/{route}", self.base)
        }
    }

    /// Map routes to absolute URLs, preserving order.
    pub fn absolute_all<'a, I>(&self, routes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        routes.into_iter().map(|route| self.absolute(route)).collect()
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Parse an absolute `http`/`https` URL.
pub fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("'{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!(
            "'{raw}': unsupported scheme '{scheme}'"
        ))),
    }
}
