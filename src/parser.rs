//! JSON decoding of the feed response.

use tracing::debug;

use crate::error::{FeedError, Result};
use crate::types::{DailyFeed, RawFeedObject};

/// Decodes a feed response body and returns the objects listed under `date`.
///
/// An empty list for `date` is a valid answer. A response without a `date`
/// key at all is not.
///
/// # Errors
///
/// Returns [`FeedError::Decode`] if the body is not a feed document, and
/// [`FeedError::MissingDate`] if `near_earth_objects` has no `date` entry.
pub fn parse_feed(bytes: &[u8], date: &str) -> Result<Vec<RawFeedObject>> {
    let mut feed: DailyFeed = serde_json::from_slice(bytes)?;
    debug!(
        element_count = feed.element_count,
        dates = feed.near_earth_objects.len(),
        "Feed decoded"
    );

    feed.near_earth_objects
        .remove(date)
        .ok_or_else(|| FeedError::MissingDate {
            date: date.to_string(),
        })
}
