//! One-shot retrieval of the NEO feed for a single day.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use tracing::{debug, info};

use crate::config::RequestConfig;
use crate::error::{FeedError, Result};
use crate::parser::parse_feed;
use crate::types::RawFeedObject;

/// Builds the GET request for `config`: feed URL, query string and JSON headers.
pub fn build_request(config: &RequestConfig) -> reqwest::Request {
    let mut req = reqwest::Request::new(reqwest::Method::GET, config.request_url());
    req.headers_mut().extend(config.headers());
    req
}

/// Fetches the feed for `config.date()` and returns that day's objects.
///
/// Exactly one request is sent. There is no retry.
///
/// # Errors
///
/// Returns a transport error ([`FeedError::Transport`] or
/// [`FeedError::HttpStatus`]) if the request fails or the status is not
/// 2xx, and a data-shape error if the body cannot be decoded or lacks the
/// requested date. Reported URLs never include the API key.
#[tracing::instrument(skip(client, config), fields(url = %config.url(), date = config.date()))]
pub async fn fetch_today<C: HttpClient>(
    client: &C,
    config: &RequestConfig,
) -> Result<Vec<RawFeedObject>> {
    let url = config.url().to_string();
    let transport = |e: reqwest::Error| FeedError::Transport {
        url: url.clone(),
        source: e.without_url(),
    };

    let resp = client.execute(build_request(config)).await.map_err(transport)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::HttpStatus {
            url: url.clone(),
            status,
        });
    }

    let bytes = resp.bytes().await.map_err(transport)?;
    debug!(bytes = bytes.len(), %status, "Feed body received");

    let objects = parse_feed(&bytes, config.date())?;
    info!(count = objects.len(), "Feed objects extracted");
    Ok(objects)
}
