//! Conversation funnel - per-user session, steps, and the engine that
//! advances them.

mod engine;
mod interaction;
mod reply;
mod session;
mod step;

pub use engine::{ConversationEngine, SideEffect, Turn, VisitRequest};
pub use interaction::{InteractionRecord, InteractionStatus};
pub use reply::{Reply, ReplySegment};
pub use session::{ConversationSession, SearchCriteria};
pub use step::ConversationStep;
