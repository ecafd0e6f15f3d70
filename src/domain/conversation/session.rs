//! Per-user conversation session.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::PropertyRecord;
use crate::domain::foundation::PhoneNumber;

use super::step::ConversationStep;

/// Search criteria accumulated while walking the funnel.
///
/// Budget is collected and logged but does not narrow results; that gap
/// is inherited bot behavior and kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub property_type: Option<String>,
    pub budget: Option<i64>,
    pub location: Option<String>,
}

/// Mutable conversation state for one phone number.
///
/// Created lazily on the first inbound message and mutated exclusively by
/// the [`super::ConversationEngine`]. Lives for the process lifetime; there
/// is no expiry (a deliberate limitation, not a feature).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    phone: PhoneNumber,
    pub step: ConversationStep,
    pub criteria: SearchCriteria,
    /// Last-presented result list; indices in user replies point here.
    /// Non-empty only once the location step has completed.
    pub results: Vec<PropertyRecord>,
    /// Set only by the selection transition out of PresentingDetails.
    pub selected: Option<PropertyRecord>,
}

impl ConversationSession {
    /// Creates a fresh session at the start of the funnel.
    pub fn new(phone: PhoneNumber) -> Self {
        Self {
            phone,
            step: ConversationStep::Start,
            criteria: SearchCriteria::default(),
            results: Vec::new(),
            selected: None,
        }
    }

    /// Returns the owning phone number.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Discards all progress, as if the user had never messaged.
    ///
    /// Backs the "start" pseudo-transition.
    pub fn reset(&mut self) {
        self.step = ConversationStep::Start;
        self.criteria = SearchCriteria::default();
        self.results.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{PropertyCatalog, PropertyRow};

    fn phone() -> PhoneNumber {
        PhoneNumber::new("whatsapp:+919812345678").unwrap()
    }

    #[test]
    fn new_session_starts_empty_at_start() {
        let session = ConversationSession::new(phone());
        assert_eq!(session.step, ConversationStep::Start);
        assert_eq!(session.criteria, SearchCriteria::default());
        assert!(session.results.is_empty());
        assert!(session.selected.is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = ConversationSession::new(phone());
        session.step = ConversationStep::SchedulingVisit;
        session.criteria.property_type = Some("3bhk".to_string());
        session.criteria.budget = Some(8_000_000);
        session.criteria.location = Some("Mumbai".to_string());
        let catalog = PropertyCatalog::from_rows(vec![PropertyRow {
            name: "Test Flat".to_string(),
            ..Default::default()
        }]);
        session.results = catalog.records().to_vec();
        session.selected = Some(catalog.records()[0].clone());

        session.reset();

        assert_eq!(session.step, ConversationStep::Start);
        assert_eq!(session.criteria, SearchCriteria::default());
        assert!(session.results.is_empty());
        assert!(session.selected.is_none());
    }
}
