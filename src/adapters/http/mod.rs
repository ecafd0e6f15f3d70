//! HTTP adapters - webhook surface for the messaging transport.

pub mod webhook;

pub use webhook::{webhook_router, WebhookAppState};
