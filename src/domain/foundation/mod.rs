//! Foundation types shared across domain modules.

mod errors;
mod phone;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use phone::PhoneNumber;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
