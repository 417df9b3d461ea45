//! Error types for fetching and reshaping the near-Earth-object feed.

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between reading configuration and writing
/// the mapped records.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The API key variable is unset or blank.
    #[error("{var} is not set; export an API key from https://api.nasa.gov")]
    MissingApiKey { var: &'static str },

    /// A date override was not in `YYYY-MM-DD` form.
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// The feed endpoint could not be parsed as a URL.
    #[error("invalid feed url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The feed answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// The body was not the expected JSON document.
    #[error("feed JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// `near_earth_objects` has no entry for the requested date.
    #[error("feed response has no entry for {date}")]
    MissingDate { date: String },

    /// An object arrived without any close-approach records.
    #[error("object {id} has no close_approach_data entries")]
    MissingCloseApproach { id: String },

    /// A numeric field held a string that is not a number.
    #[error("field {field} is not numeric: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl FeedError {
    /// Missing or malformed configuration, detected before any request.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            FeedError::MissingApiKey { .. }
                | FeedError::InvalidDate { .. }
                | FeedError::InvalidUrl { .. }
        )
    }

    /// Network failure or non-success HTTP status.
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport { .. } | FeedError::HttpStatus { .. })
    }

    /// The response, or an object inside it, did not have the expected shape.
    pub fn is_data_shape(&self) -> bool {
        matches!(
            self,
            FeedError::Decode(_)
                | FeedError::MissingDate { .. }
                | FeedError::MissingCloseApproach { .. }
                | FeedError::InvalidNumber { .. }
        )
    }

    /// Target URL for transport failures.
    pub fn url(&self) -> Option<&str> {
        match self {
            FeedError::Transport { url, .. } | FeedError::HttpStatus { url, .. } => Some(url),
            _ => None,
        }
    }
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
