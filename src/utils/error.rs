//! Error types for the API client, profile resolver and report writer
//!
//! This module defines the domain errors wrapped by [`crate::error::Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the SAKURA Cloud API
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// API answered with a non-success status
    #[error("API returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Query filter could not be encoded
    #[error("Failed to encode query filter: {0}")]
    EncodeQuery(#[source] serde_json::Error),
}

/// Errors that can occur while resolving a usacloud profile
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Profile name is not usable as a directory name
    #[error("Invalid profile name: {0:?}")]
    InvalidName(String),

    /// Neither a profile directory override nor HOME is set
    #[error("Cannot locate profile directory: HOME is not set")]
    HomeNotFound,

    /// Named profile does not exist
    #[error("Profile {name:?} not found at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    /// Profile file could not be read
    #[error("Failed to read profile {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile file is not valid JSON
    #[error("Failed to parse profile {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Access token or secret is empty
    #[error("Profile {0:?} has no access token or secret")]
    MissingCredentials(String),
}

/// Errors that can occur while writing the report
#[derive(Error, Debug)]
pub enum WriteError {
    /// Underlying stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited (CSV/TSV) encoder failed
    #[error("Delimited output error: {0}")]
    Delimited(#[from] csv::Error),

    /// JSON encoder failed
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
