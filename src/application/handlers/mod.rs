//! Use-case handlers.

mod handle_message;

pub use handle_message::HandleInboundMessage;
