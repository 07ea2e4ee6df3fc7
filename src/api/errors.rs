//! Form service API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not signed in. Set FORMDASH_API_TOKEN and try again")]
    Unauthorized,

    #[error("request to {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
