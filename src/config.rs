//! Request configuration for the NEO feed.
//!
//! [`RequestConfig`] is built once at start-up and passed by reference to the
//! fetch path. Nothing in it changes after construction.

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::date::today_local;
use crate::error::{FeedError, Result};

/// NASA NeoWs feed endpoint.
pub const FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "NASA_API_KEY";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const APPLICATION_JSON: &str = "application/json";

/// Target, credentials and date range for one feed request.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    url: Url,
    api_key: String,
    date: String,
    timeout: Duration,
}

impl RequestConfig {
    /// Builds a config for `date` against the public feed endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::MissingApiKey`] if `api_key` is blank.
    pub fn new(api_key: impl Into<String>, date: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FeedError::MissingApiKey { var: API_KEY_VAR });
        }

        Ok(Self {
            url: parse_url(FEED_URL)?,
            api_key,
            date: date.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads the API key from the process environment and targets today's
    /// local date.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`RequestConfig::from_env`], with variables resolved through
    /// `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(FeedError::MissingApiKey { var: API_KEY_VAR })?;
        Self::new(api_key, today_local())
    }

    /// Points the request at a different endpoint.
    pub fn with_url(mut self, url: &str) -> Result<Self> {
        self.url = parse_url(url)?;
        Ok(self)
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The `YYYY-MM-DD` date used for both ends of the range and as the
    /// response lookup key.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// JSON content-type and accept headers.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers
    }

    /// Query parameters in request order.
    pub fn query(&self) -> [(&'static str, &str); 3] {
        [
            ("api_key", self.api_key.as_str()),
            ("start_date", self.date.as_str()),
            ("end_date", self.date.as_str()),
        ]
    }

    /// Full request URL including the query string.
    pub fn request_url(&self) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().extend_pairs(self.query());
        url
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| FeedError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
