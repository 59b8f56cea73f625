//! Error types for the Linkup search tool
//!
//! Every failure is reported once and the call ends; there are no retries
//! anywhere in the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// No API credential configured. Raised before any network call.
    #[error("LINKUP_API_KEY is not set")]
    MissingApiKey,

    /// The required `query` parameter was missing or empty.
    #[error("Missing required parameter: query")]
    MissingQuery,

    /// A parameter had a value outside its accepted set.
    #[error("Invalid value for parameter {param}: {value}")]
    InvalidParam { param: &'static str, value: String },

    /// The Linkup API answered with a non-2xx status.
    #[error("Linkup API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Transport or decode failure, original message preserved.
    #[error("Failed to search with Linkup: {0}")]
    Client(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Client(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Client(err.to_string())
    }
}
