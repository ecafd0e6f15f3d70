//! Messaging webhook adapter.
//!
//! Accepts the transport's form-encoded inbound POST and answers with a
//! TwiML-style XML document the transport turns into outbound messages.

mod dto;
mod handlers;
mod routes;
mod twiml;

pub use dto::InboundMessage;
pub use handlers::WebhookAppState;
pub use routes::webhook_router;
pub use twiml::render_twiml;
