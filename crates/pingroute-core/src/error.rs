//! Error types and handling for pingroute-core operations.
//!
//! Errors fall into two groups. Input problems (bad base URL, missing key,
//! malformed credential file, failed token exchange) are returned as
//! [`Error`] values and abort the whole operation. Per-destination failures
//! during submission are never errors: they are recorded as data in the
//! submission reports so a caller never has to handle partial failure.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading manifests, credentials, writing key files
//! - **Network Errors**: client construction and token exchange transport
//! - **Validation Errors**: base URL, explicit URLs, IndexNow keys
//! - **Credential Errors**: service-account file shape and signing keys
//! - **Token Errors**: non-successful or unparseable token responses
//! - **Configuration Errors**: invalid `pingroute.toml` or filter patterns
//!
//! ```rust
//! use pingroute_core::{Error, SiteUrl};
//!
//! match SiteUrl::parse("not a url") {
//!     Err(Error::InvalidUrl(msg)) => eprintln!("bad base url: {msg}"),
//!     Err(e) => eprintln!("{} error: {e}", e.category()),
//!     Ok(site) => println!("{site}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for pingroute-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Missing manifest files are not reported through this variant; they
    /// simply contribute no routes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed outside of a per-destination submission.
    ///
    /// Submission transport failures are recorded in the report instead.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// IndexNow key is missing or has an invalid shape.
    #[error("Invalid IndexNow key: {0}")]
    InvalidKey(String),

    /// Service-account credential file is unreadable, malformed, or lacks a
    /// required field.
    #[error("Invalid service account credential: {0}")]
    Credential(String),

    /// Building the signed JWT assertion failed.
    ///
    /// Covers PEM decoding, PKCS#8 key rejection and RSA signing errors.
    #[error("Signing error: {0}")]
    Signing(String),

    /// The OAuth token endpoint did not return a usable access token.
    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Response body text, or a description of what was missing.
        body: String,
    },

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Check if the error might succeed on a later attempt.
    ///
    /// Nothing in this crate retries; the hint is surfaced for callers that
    /// want to schedule another run.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::TokenExchange { status, .. } => *status == 429 || *status >= 500,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidKey(_) => "invalid_key",
            Self::Credential(_) => "credential",
            Self::Signing(_) => "signing",
            Self::TokenExchange { .. } => "token",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
