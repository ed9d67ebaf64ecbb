//! Single-flight attraction catalog cache
//!
//! The catalog fetch may be slow and remote, so it runs at most once per
//! process: concurrent first callers all wait on the same in-flight fetch
//! and none can observe a partially-populated cache. Callers get their own
//! copy of the list; mutating it cannot corrupt the cache.

use crate::domain::types::Attraction;
use crate::error::TrackError;
use crate::io::gps::GpsProvider;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

pub struct AttractionCatalog {
    gps: Arc<dyn GpsProvider>,
    cache: OnceCell<Vec<Attraction>>,
}

impl AttractionCatalog {
    pub fn new(gps: Arc<dyn GpsProvider>) -> Self {
        Self { gps, cache: OnceCell::new() }
    }

    /// The full attraction list, fetching from the provider on first call.
    ///
    /// A failed first fetch leaves the cache empty; the next caller
    /// retries.
    pub async fn attractions(&self) -> Result<Vec<Attraction>, TrackError> {
        let attractions = self
            .cache
            .get_or_try_init(|| async {
                let attractions = self.gps.attractions().await?;
                info!(count = %attractions.len(), "attraction_catalog_loaded");
                Ok::<_, TrackError>(attractions)
            })
            .await?;

        Ok(attractions.clone())
    }

    /// Number of cached attractions, if the cache has been populated
    pub fn cached_len(&self) -> Option<usize> {
        self.cache.get().map(Vec::len)
    }
}
