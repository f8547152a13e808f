use std::path::{Path, PathBuf};

use async_trait::async_trait;
use offers_core::{AvailabilityRecord, Catalog, Error, Feed, Result};
use tracing::{debug, warn};

use crate::feed::{FeedSource, decode};

/// Reads both feeds from JSON documents on disk
pub struct FileSource {
    availability_path: PathBuf,
    catalog_path: PathBuf,
}

impl FileSource {
    pub fn new(availability_path: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            availability_path: availability_path.into(),
            catalog_path: catalog_path.into(),
        }
    }

    async fn read(feed: Feed, path: &Path) -> Result<Vec<u8>> {
        debug!(feed = %feed, path = %path.display(), "Reading feed file");
        tokio::fs::read(path).await.map_err(|e| {
            Error::fetch(
                feed,
                anyhow::anyhow!("Failed to read file {}: {}", path.display(), e),
            )
        })
    }
}

#[async_trait]
impl FeedSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn availability(&self) -> Result<Vec<AvailabilityRecord>> {
        let body = Self::read(Feed::Availability, &self.availability_path).await?;
        decode(Feed::Availability, &body)
    }

    async fn catalog(&self, subsidiary: &str) -> Result<Catalog> {
        let body = Self::read(Feed::Catalog, &self.catalog_path).await?;
        let catalog: Catalog = decode(Feed::Catalog, &body)?;

        if let Some(found) = catalog.locale.subsidiary.as_deref() {
            if !found.eq_ignore_ascii_case(subsidiary) {
                warn!(
                    requested = subsidiary,
                    found = found,
                    "Catalog file belongs to a different subsidiary"
                );
            }
        }

        Ok(catalog)
    }
}
