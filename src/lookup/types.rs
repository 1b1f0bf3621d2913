//! Lookup error definitions.

use thiserror::Error;

/// Errors that can occur while calling an external API.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Connection or transport failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status}")]
    Status { status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The geocoding result has no city name.
    #[error("no city found for postal code {0}")]
    MissingCity(String),
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

impl LookupError {
    /// Outcome label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Request(_) => "request",
            LookupError::Status { .. } => "status",
            LookupError::Decode(_) => "decode",
            LookupError::MissingCity(_) => "missing_city",
        }
    }
}
