//! Webhook request payloads.

use serde::Deserialize;

/// Form-encoded inbound message from the transport.
///
/// Twilio-style field names: `Body` carries the text, `From` the sender.
/// Both default to empty so a malformed post still reaches the handler's
/// apology path instead of a framework 422.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}
