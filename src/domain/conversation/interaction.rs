//! Interaction log records.
//!
//! Each qualified search appends one row to an external tabular log; later
//! milestones rewrite that row's status in place.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PhoneNumber, StateMachine, Timestamp};

/// Lifecycle status of an interaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    /// User greeted the bot but has not completed qualification.
    #[default]
    Inquiry,

    /// Criteria collected, result list presented.
    Searching,

    /// User picked a property from the list.
    PropertySelected,

    /// User asked for a visit.
    VisitScheduled,
}

impl InteractionStatus {
    /// Column text written to the external log.
    pub fn as_sheet_value(&self) -> &'static str {
        match self {
            Self::Inquiry => "Inquiry",
            Self::Searching => "Searching",
            Self::PropertySelected => "Property Selected",
            Self::VisitScheduled => "Visit Scheduled",
        }
    }
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sheet_value())
    }
}

impl StateMachine for InteractionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InteractionStatus::*;
        matches!(
            (self, target),
            (Inquiry, Searching) | (Searching, PropertySelected) | (PropertySelected, VisitScheduled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InteractionStatus::*;
        match self {
            Inquiry => vec![Searching],
            Searching => vec![PropertySelected],
            PropertySelected => vec![VisitScheduled],
            VisitScheduled => vec![],
        }
    }
}

/// One row of the interaction log.
///
/// Append-only at the port; the latest row for a phone number may later
/// have its status (and visit note) rewritten in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub timestamp: Timestamp,
    pub phone: PhoneNumber,
    pub property_type: String,
    pub budget: i64,
    pub location: String,
    pub selected_property: String,
    pub visit_schedule: String,
    pub status: InteractionStatus,
}

impl InteractionRecord {
    /// Creates a record for a completed search, timestamped now.
    pub fn searching(
        phone: PhoneNumber,
        property_type: impl Into<String>,
        budget: i64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            phone,
            property_type: property_type.into(),
            budget,
            location: location.into(),
            selected_property: String::new(),
            visit_schedule: String::new(),
            status: InteractionStatus::Searching,
        }
    }
}
