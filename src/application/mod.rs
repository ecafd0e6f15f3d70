//! Application layer - use-case orchestration over domain and ports.

pub mod catalog_loader;
pub mod handlers;

pub use catalog_loader::{load_catalog, SharedCatalog};
pub use handlers::HandleInboundMessage;
