//! Unified error handling for the mainte-servers crate
//!
//! Every failure of a report run is one variant of [`Error`]. Domain errors
//! from [`crate::utils::error`] are wrapped so callers can still inspect the
//! transport or profile details.
//!
//! - [`ErrorCategory`] - Classification of errors for reporting
//! - [`Error`] - Unified error enum
//!
//! # Usage
//!
//! ```rust,ignore
//! use mainte_servers::error::Error;
//!
//! fn handle_error(err: Error) {
//!     if err.is_fatal() {
//!         eprintln!("{} error: {err}", err.category().as_str());
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{FetchError, ProfileError, WriteError};

/// Classification of errors for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid command-line input
    Input,
    /// Credential or profile lookup
    Credentials,
    /// Transport and HTTP status errors
    Network,
    /// Malformed API response body
    Parsing,
    /// Result sets that cannot be joined completely
    Integrity,
    /// Report output stream errors
    Output,
    /// Configuration errors
    Config,
}

impl ErrorCategory {
    /// Short lowercase label, used as a log field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Credentials => "credentials",
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Integrity => "integrity",
            Self::Output => "output",
            Self::Config => "config",
        }
    }
}

/// Unified error type for the mainte-servers crate
#[derive(Error, Debug)]
pub enum Error {
    /// A `--start` or `--end` value is not `yyyy-mm-dd`
    #[error("date format must be yyyy-mm-dd: {0:?}")]
    InvalidDateFormat(String),

    /// Credential profile could not be resolved
    #[error("Profile error: {0}")]
    ProfileResolution(#[from] ProfileError),

    /// Transport-level failure
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Response body did not match the expected shape
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Maintenance query returned more rows than one page holds
    #[error(
        "too many maintenances returned ({total} > {limit}); \
         please make start date and end date closer to each other"
    )]
    ResultSetTooLarge { total: u64, limit: u64 },

    /// Server query returned more rows than one page holds
    #[error("too many maintenance-scheduled servers returned in zone {zone}: {total} > {limit}")]
    ResultSetTruncated { zone: String, total: u64, limit: u64 },

    /// A server refers to a maintenance that was not fetched
    #[error(
        "server {server_id} in zone {zone} refers to unknown maintenance {info_url}"
    )]
    JoinInconsistency {
        zone: String,
        server_id: String,
        info_url: String,
    },

    /// Report could not be written
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a decode error for the named endpoint
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Whether this error must abort the run
    ///
    /// Only a truncated server listing is reported as a warning.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ResultSetTruncated { .. })
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDateFormat(_) => ErrorCategory::Input,
            Self::ProfileResolution(_) => ErrorCategory::Credentials,
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Decode { .. } => ErrorCategory::Parsing,
            Self::ResultSetTooLarge { .. }
            | Self::ResultSetTruncated { .. }
            | Self::JoinInconsistency { .. } => ErrorCategory::Integrity,
            Self::Write(_) => ErrorCategory::Output,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
