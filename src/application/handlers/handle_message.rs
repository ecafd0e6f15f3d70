//! Inbound message use case.
//!
//! Resolves the session, runs the engine, executes the turn's side
//! effects best-effort, and persists the session. Every failure path
//! still produces a reply.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::catalog_loader::SharedCatalog;
use crate::domain::conversation::{ConversationEngine, Reply, ReplySegment, SideEffect};
use crate::domain::foundation::{DomainError, PhoneNumber};
use crate::ports::{InteractionRecorder, SessionStore, VisitScheduler};

const APOLOGY: &str =
    "❌ Sorry, there was an error processing your message. Please try again later, \
     or send 'start' to begin again.";

/// Handles one inbound webhook message end to end.
pub struct HandleInboundMessage {
    sessions: Arc<dyn SessionStore>,
    recorder: Arc<dyn InteractionRecorder>,
    scheduler: Arc<dyn VisitScheduler>,
    catalog: SharedCatalog,
    engine: ConversationEngine,
}

impl HandleInboundMessage {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        recorder: Arc<dyn InteractionRecorder>,
        scheduler: Arc<dyn VisitScheduler>,
        catalog: SharedCatalog,
    ) -> Self {
        Self {
            sessions,
            recorder,
            scheduler,
            catalog,
            engine: ConversationEngine::new(),
        }
    }

    /// Produces the reply for one message. Never fails: internal errors
    /// are logged and turned into a generic apology.
    pub async fn execute(&self, phone: PhoneNumber, body: &str) -> Reply {
        match self.try_execute(phone.clone(), body).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(phone = %phone, error = %err, "message handling failed");
                Reply::text(APOLOGY)
            }
        }
    }

    async fn try_execute(&self, phone: PhoneNumber, body: &str) -> Result<Reply, DomainError> {
        let mut session = self.sessions.get_or_create(&phone).await?;
        let catalog = self.catalog.read().await.clone();
        let turn = self.engine.handle(&mut session, body, &catalog);

        let mut reply = turn.reply;
        for effect in turn.effects {
            self.apply_effect(effect, &mut reply).await;
        }

        self.sessions.save(session).await?;
        Ok(reply)
    }

    // Interaction-log writes are fire-and-forget; only the calendar
    // booking feeds its outcome back into the reply.
    async fn apply_effect(&self, effect: SideEffect, reply: &mut Reply) {
        match effect {
            SideEffect::Record(record) => {
                if let Err(err) = self.recorder.append(record).await {
                    warn!(error = %err, "failed to append interaction row");
                }
            }
            SideEffect::UpdateStatus {
                phone,
                status,
                schedule_note,
            } => {
                if let Err(err) = self
                    .recorder
                    .update_latest_status(&phone, status, schedule_note)
                    .await
                {
                    warn!(error = %err, "failed to update interaction status");
                }
            }
            SideEffect::ScheduleVisit(request) => {
                match self.scheduler.schedule(request.clone()).await {
                    Ok(visit) => {
                        info!(event_id = %visit.event_id, event = %visit_label(&request), "visit booked");
                        reply.push(ReplySegment::text(format!(
                            "✅ Visit scheduled!\n\nProperty: {}\nDate: {}\nTime: {}\n\
                             Duration: 1 hour\n\nYou'll receive a calendar invitation shortly! 📅",
                            request.property_name, request.date, request.time
                        )));
                    }
                    Err(err) => {
                        warn!(error = %err, event = %visit_label(&request), "visit scheduling failed");
                        reply.push(ReplySegment::text(format!(
                            "❌ Sorry, couldn't schedule the visit. Error: {}",
                            err
                        )));
                    }
                }
            }
        }
    }
}

fn visit_label(request: &crate::domain::conversation::VisitRequest) -> String {
    format!("{} {} {}", request.property_name, request.date, request.time)
}
