//! Catalog loading with explicit fallback.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::catalog::PropertyCatalog;
use crate::ports::PropertySource;

/// Catalog handle shared across webhook requests.
///
/// Readers clone a snapshot per turn, so a future swap of the whole
/// catalog never exposes a half-replaced set.
pub type SharedCatalog = Arc<RwLock<PropertyCatalog>>;

/// Loads the catalog from the property source, degrading to the built-in
/// fallback when the source fails or returns nothing.
///
/// The degradation is a deliberate availability decision: the bot must
/// always be able to respond, so an unreachable spreadsheet costs listing
/// freshness, never uptime. Both degrade paths are logged.
pub async fn load_catalog(source: &dyn PropertySource) -> PropertyCatalog {
    match source.fetch_rows().await {
        Ok(rows) if rows.is_empty() => {
            warn!("property source returned no rows, using fallback catalog");
            PropertyCatalog::fallback()
        }
        Ok(rows) => {
            let catalog = PropertyCatalog::from_rows(rows);
            if catalog.is_empty() {
                warn!("property rows were all unusable, using fallback catalog");
                return PropertyCatalog::fallback();
            }
            info!(count = catalog.records().len(), "property catalog loaded");
            catalog
        }
        Err(err) => {
            warn!(error = %err, "property source unavailable, using fallback catalog");
            PropertyCatalog::fallback()
        }
    }
}
