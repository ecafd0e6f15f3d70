//! Axum router configuration for the webhook endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, receive_message, WebhookAppState};

/// Create the webhook router.
///
/// # Routes
/// - `POST /webhook/whatsapp` - inbound messages (form-encoded, TwiML out)
/// - `GET /health` - liveness probe
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .route("/webhook/whatsapp", post(receive_message))
        .route("/health", get(health))
}
