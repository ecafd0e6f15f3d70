//! Property source port.
//!
//! Supplies the loosely-typed listing rows the catalog is built from.
//! A failing or empty source degrades to the built-in fallback catalog;
//! it never takes the bot down.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::PropertyRow;

/// Errors from the external property store.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("property source request failed: {0}")]
    Request(String),

    #[error("property source returned an unreadable payload: {0}")]
    Malformed(String),
}

/// External tabular store of property listings.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetches all listing rows.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the store is unreachable or the payload
    /// cannot be read. Callers fall back to the built-in catalog.
    async fn fetch_rows(&self) -> Result<Vec<PropertyRow>, SourceError>;
}
