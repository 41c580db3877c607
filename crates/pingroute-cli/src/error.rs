//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed and every destination accepted it |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, key, URL or configuration |
//! | 3 | `NotFound` | A named file does not exist |
//! | 5 | `Network` | Network failure, or a destination rejected a submission |
//! | 6 | `Auth` | Service-account credential, signing or token exchange failure |
//!
//! ```bash
//! pingroute indexnow --base-url https://example.com
//! case $? in
//!     0) echo "All endpoints accepted" ;;
//!     5) echo "At least one endpoint failed" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,

    /// Requested file not found (exit code 3).
    NotFound = 3,

    /// Network failure or rejected submission (exit code 5).
    ///
    /// Used both for transport errors that abort a command and for
    /// completed submissions where at least one destination failed.
    Network = 5,

    /// Authentication failure (exit code 6).
    Auth = 6,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Auth => "authentication error",
        }
    }

    /// Categorize an error from the core library.
    #[must_use]
    pub fn from_core(err: &pingroute_core::Error) -> Self {
        use pingroute_core::Error;

        match err {
            Error::InvalidUrl(_) | Error::InvalidKey(_) | Error::Config(_) => Self::Usage,
            Error::Credential(_) | Error::Signing(_) | Error::TokenExchange { .. } => Self::Auth,
            Error::Network(_) => Self::Network,
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => Self::NotFound,
            Error::Io(_) | Error::Serialization(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` with an `ErrorCategory` to enable proper
/// exit codes while preserving full error context and chains.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a network error.
    pub fn network(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Network, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl From<pingroute_core::Error> for CliError {
    fn from(err: pingroute_core::Error) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit [`CliError`]s keep their category. Bare core errors are
/// categorized by variant and anything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<pingroute_core::Error>() {
        return ErrorCategory::from_core(core_err).exit_code();
    }
    ErrorCategory::Internal.exit_code()
}
