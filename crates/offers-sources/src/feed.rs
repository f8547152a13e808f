//! Feed source trait

use async_trait::async_trait;
use offers_core::{AvailabilityRecord, Catalog, Error, Feed, Result};
use serde::de::DeserializeOwned;

/// Supplies the two raw feeds the engine joins
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Fetch the per-unit availability feed
    async fn availability(&self) -> Result<Vec<AvailabilityRecord>>;

    /// Fetch the pricing catalog for a subsidiary
    async fn catalog(&self, subsidiary: &str) -> Result<Catalog>;
}

/// Decode a feed payload, tagging failures with the feed
pub fn decode<T: DeserializeOwned>(feed: Feed, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::decode(feed, e))
}
