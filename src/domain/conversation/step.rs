//! Conversation step state machine.
//!
//! The funnel mirrors a sales qualification flow: property type, then
//! budget, then location, then selection, then visit booking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a user currently is in the conversation funnel.
///
/// Forward movement goes through [`StateMachine::transition_to`]. Two
/// pseudo-transitions bypass the table and are handled by the engine:
/// "back" moves to [`ConversationStep::previous`], "start" resets the
/// whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    /// Nothing asked yet; the next message gets the greeting.
    #[default]
    Start,

    /// Waiting for a room-type answer ("3bhk").
    CollectingPropertyType,

    /// Waiting for a budget amount ("80L", "1.5cr").
    CollectingBudget,

    /// Waiting for a location; completing this step produces the
    /// numbered result list.
    CollectingLocation,

    /// Result list shown; waiting for an index or exact name.
    PresentingDetails,

    /// Property chosen; waiting for visit scheduling input.
    SchedulingVisit,
}

impl ConversationStep {
    /// Static one-level "back" target.
    ///
    /// The original bot kept no step history, only this preceding-state
    /// map, so repeated "back" cannot regress deeper than one hop at a
    /// time. Preserved deliberately.
    pub fn previous(&self) -> Self {
        use ConversationStep::*;
        match self {
            Start => Start,
            CollectingPropertyType => Start,
            CollectingBudget => CollectingPropertyType,
            CollectingLocation => CollectingBudget,
            PresentingDetails => CollectingLocation,
            SchedulingVisit => PresentingDetails,
        }
    }
}

impl StateMachine for ConversationStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationStep::*;
        matches!(
            (self, target),
            // Greeting sent, start qualifying
            (Start, CollectingPropertyType) |
            // Room type captured
            (CollectingPropertyType, CollectingBudget) |
            // Budget captured
            (CollectingBudget, CollectingLocation) |
            // Location captured, results presented
            (CollectingLocation, PresentingDetails) |
            // Property selected
            (PresentingDetails, SchedulingVisit)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStep::*;
        match self {
            Start => vec![CollectingPropertyType],
            CollectingPropertyType => vec![CollectingBudget],
            CollectingBudget => vec![CollectingLocation],
            CollectingLocation => vec![PresentingDetails],
            PresentingDetails => vec![SchedulingVisit],
            SchedulingVisit => vec![],
        }
    }
}
