//! Ports - contracts between the domain and the outside world.

mod interaction_recorder;
mod property_source;
mod session_store;
mod visit_scheduler;

pub use interaction_recorder::InteractionRecorder;
pub use property_source::{PropertySource, SourceError};
pub use session_store::SessionStore;
pub use visit_scheduler::{ScheduleError, ScheduledVisit, VisitScheduler};
