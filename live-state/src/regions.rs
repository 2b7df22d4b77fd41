//! Installed region table and color lookup

use std::sync::Arc;

use parking_lot::RwLock;
use region_table::color::hex_from_literal;
use region_table::{FetchResult, RegionFetcher, RegionsData};

/// Color shown for regions that are missing or carry no usable color
pub const UNKNOWN_COLOR: &str = "Unknown";

/// The most recently fetched region table.
///
/// Starts empty, so every lookup misses until a fetch succeeds. A refresh
/// swaps in a whole new table; readers holding the previous `Arc` keep a
/// consistent view. Cloning shares the snapshot.
#[derive(Debug, Clone, Default)]
pub struct RegionSnapshot {
    current: Arc<RwLock<Arc<RegionsData>>>,
}

impl RegionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The installed table
    pub fn current(&self) -> Arc<RegionsData> {
        Arc::clone(&self.current.read())
    }

    /// Replace the installed table
    pub fn install(&self, regions: RegionsData) {
        *self.current.write() = Arc::new(regions);
    }

    /// Display color for a region name.
    ///
    /// Returns uppercase hex for a known region with a numeric color and
    /// [`UNKNOWN_COLOR`] otherwise.
    pub fn resolve_color(&self, name: &str) -> String {
        let regions = self.current();

        let Some(entry) = regions.get(name) else {
            return UNKNOWN_COLOR.to_string();
        };

        if entry.color.is_empty() {
            return UNKNOWN_COLOR.to_string();
        }

        match hex_from_literal(&entry.color) {
            Some(hex) => hex,
            None => {
                tracing::warn!("Region '{}' has a color without leading digits {:?}", name, entry.color);
                UNKNOWN_COLOR.to_string()
            }
        }
    }
}

/// Fetch the region table and install it.
///
/// On failure the installed table is left as it was and the error is
/// logged and returned. Returns the number of regions installed.
pub async fn refresh_into(fetcher: &RegionFetcher, snapshot: &RegionSnapshot) -> FetchResult<usize> {
    match fetcher.refresh().await {
        Ok(regions) => {
            let count = regions.len();
            snapshot.install(regions);
            tracing::info!("Installed {} regions from {}", count, fetcher.endpoint());
            Ok(count)
        }
        Err(e) => {
            tracing::warn!("Region refresh from {} failed: {}", fetcher.endpoint(), e);
            Err(e)
        }
    }
}
