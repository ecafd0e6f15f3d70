//! HTTP handlers for the messaging webhook.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::application::HandleInboundMessage;
use crate::domain::conversation::Reply;
use crate::domain::foundation::PhoneNumber;

use super::dto::InboundMessage;
use super::twiml::render_twiml;

/// Shared webhook state; cloned per request.
#[derive(Clone)]
pub struct WebhookAppState {
    pub handler: Arc<HandleInboundMessage>,
}

/// `POST /webhook/whatsapp` - one inbound message, one TwiML reply.
///
/// Always answers 200 with XML: the transport retries non-2xx responses,
/// and a retry storm helps nobody. A missing or malformed sender gets the
/// generic apology.
pub async fn receive_message(
    State(state): State<WebhookAppState>,
    Form(message): Form<InboundMessage>,
) -> Response {
    let reply = match PhoneNumber::new(message.from.clone()) {
        Ok(phone) => {
            info!(phone = %phone, "inbound message");
            state.handler.execute(phone, &message.body).await
        }
        Err(err) => {
            warn!(from = %message.from, error = %err, "unusable sender on inbound message");
            Reply::text(
                "❌ Sorry, there was an error processing your message. Please try again later.",
            )
        }
    };

    xml_response(&reply)
}

/// `GET /health` - liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

fn xml_response(reply: &Reply) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        render_twiml(reply),
    )
        .into_response()
}
