//! Conversation engine.
//!
//! Advances a session one step per inbound message and produces the reply
//! plus any side effects. The engine itself is pure: it never touches the
//! network. Side effects (interaction log writes, calendar bookings) are
//! returned as values and executed best-effort by the application layer,
//! so a failed write can never block the reply.

use crate::domain::catalog::{PropertyCatalog, PropertyRecord};
use crate::domain::currency::{format_inr, parse_amount};
use crate::domain::foundation::{PhoneNumber, StateMachine};

use super::interaction::{InteractionRecord, InteractionStatus};
use super::reply::{Reply, ReplySegment};
use super::session::ConversationSession;
use super::step::ConversationStep;

/// A calendar booking request extracted from a scheduling message.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRequest {
    pub property_name: String,
    pub visitor_name: String,
    pub visitor_phone: String,
    /// Preferred date, "YYYY-MM-DD".
    pub date: String,
    /// Preferred time, "HH:MM".
    pub time: String,
}

/// Deferred external action produced by a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Append a row to the interaction log.
    Record(InteractionRecord),
    /// Rewrite the newest log row for this phone: status, and the visit
    /// note when present.
    UpdateStatus {
        phone: PhoneNumber,
        status: InteractionStatus,
        schedule_note: Option<String>,
    },
    /// Book a 1-hour calendar visit. The application layer appends the
    /// outcome (confirmation or the scheduler's error text) to the reply.
    ScheduleVisit(VisitRequest),
}

/// Everything one inbound message produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub reply: Reply,
    pub effects: Vec<SideEffect>,
}

impl Turn {
    fn reply_only(reply: Reply) -> Self {
        Self {
            reply,
            effects: Vec::new(),
        }
    }
}

/// The funnel state machine.
///
/// Stateless; all conversation state lives in the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationEngine;

impl ConversationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Handles one inbound message.
    ///
    /// Mutates the session in place and returns the reply plus deferred
    /// side effects. Malformed input never errors; it re-prompts.
    pub fn handle(
        &self,
        session: &mut ConversationSession,
        text: &str,
        catalog: &PropertyCatalog,
    ) -> Turn {
        let message = text.trim();
        let lower = message.to_lowercase();

        // Pseudo-transitions, reachable from any step.
        if lower == "start" {
            session.reset();
            return Turn::reply_only(Reply::text(
                "🔄 Starting over! Say anything to begin your property search.",
            ));
        }
        if lower == "back" {
            session.step = session.step.previous();
            return Turn::reply_only(Reply::text(prompt_for(session.step)));
        }

        match session.step {
            ConversationStep::Start => self.greet(session),
            ConversationStep::CollectingPropertyType => self.collect_property_type(session, &lower),
            ConversationStep::CollectingBudget => self.collect_budget(session, message),
            ConversationStep::CollectingLocation => self.collect_location(session, message, catalog),
            ConversationStep::PresentingDetails => self.select_property(session, message),
            ConversationStep::SchedulingVisit => self.schedule_visit(session, message, &lower),
        }
    }

    // Start: content is ignored, every first message gets the greeting.
    fn greet(&self, session: &mut ConversationSession) -> Turn {
        session.step = advance(session.step, ConversationStep::CollectingPropertyType);
        Turn::reply_only(Reply::text(
            "👋 Welcome to the Estate Concierge! 🏠\n\n\
             Let's find your perfect property.\n\
             What type are you looking for? (e.g. 2BHK, 3BHK)",
        ))
    }

    fn collect_property_type(&self, session: &mut ConversationSession, lower: &str) -> Turn {
        if lower.contains("bhk") {
            session.criteria.property_type = Some(lower.to_string());
            session.step = advance(session.step, ConversationStep::CollectingBudget);
            Turn::reply_only(Reply::text(
                "💰 Great! What's your budget? (e.g. 80L, 1.5cr)",
            ))
        } else {
            Turn::reply_only(Reply::text(prompt_for(session.step)))
        }
    }

    fn collect_budget(&self, session: &mut ConversationSession, message: &str) -> Turn {
        let amount = parse_amount(message);
        if amount > 0 {
            session.criteria.budget = Some(amount);
            session.step = advance(session.step, ConversationStep::CollectingLocation);
            Turn::reply_only(Reply::text(format!(
                "📍 Noted, budget {}. Which location would you like?",
                format_inr(amount)
            )))
        } else {
            Turn::reply_only(Reply::text(prompt_for(session.step)))
        }
    }

    fn collect_location(
        &self,
        session: &mut ConversationSession,
        message: &str,
        catalog: &PropertyCatalog,
    ) -> Turn {
        session.criteria.location = Some(message.to_string());
        // Budget and location are recorded but do not narrow the list;
        // longstanding bot behavior, kept as-is.
        session.results = catalog.records().to_vec();
        session.step = advance(session.step, ConversationStep::PresentingDetails);

        let record = InteractionRecord::searching(
            session.phone().clone(),
            session.criteria.property_type.clone().unwrap_or_default(),
            session.criteria.budget.unwrap_or(0),
            message,
        );

        Turn {
            reply: Reply::text(render_result_list(message, &session.results)),
            effects: vec![SideEffect::Record(record)],
        }
    }

    // Bare digits are menu indices only here; location input upstream is
    // always taken as free text, so "1 Main St" can never collide with
    // "option 1".
    fn select_property(&self, session: &mut ConversationSession, message: &str) -> Turn {
        let found = match message.parse::<usize>() {
            Ok(index) => PropertyCatalog::find_by_index(&session.results, index),
            Err(_) => PropertyCatalog::find_by_name(&session.results, message),
        };

        match found.cloned() {
            Some(record) => {
                session.selected = Some(record.clone());
                session.step = advance(session.step, ConversationStep::SchedulingVisit);
                let reply = Reply::default()
                    .and(ReplySegment::with_media(
                        render_details(&record),
                        record.images.clone(),
                    ))
                    .and(ReplySegment::text(SCHEDULE_PROMPT));
                Turn {
                    reply,
                    effects: vec![SideEffect::UpdateStatus {
                        phone: session.phone().clone(),
                        status: InteractionStatus::PropertySelected,
                        schedule_note: None,
                    }],
                }
            }
            None => Turn::reply_only(Reply::text(
                "❌ I couldn't find that one. Reply with the property number \
                 or its exact name, or 'back' for the list again.",
            )),
        }
    }

    fn schedule_visit(
        &self,
        session: &mut ConversationSession,
        message: &str,
        lower: &str,
    ) -> Turn {
        let property_name = session
            .selected
            .as_ref()
            .map(|record| record.name.clone())
            .unwrap_or_default();

        // Full booking block: name / phone / date / time on separate lines
        // goes straight to the calendar.
        if let Some(request) = parse_visit_block(message, &property_name) {
            let note = format!("{} {}", request.date, request.time);
            return Turn {
                reply: Reply::default(),
                effects: vec![
                    SideEffect::ScheduleVisit(request),
                    SideEffect::UpdateStatus {
                        phone: session.phone().clone(),
                        status: InteractionStatus::VisitScheduled,
                        schedule_note: Some(note),
                    },
                ],
            };
        }

        if lower.contains("yes") {
            // "Yes, Saturday" should land in the log as "saturday", not
            // ", saturday".
            let note = lower
                .split_once("yes")
                .map(|(_, rest)| rest.trim().trim_start_matches([',', '-']).trim().to_string())
                .unwrap_or_default();
            return Turn {
                reply: Reply::text(format!(
                    "✅ Visit request noted for {}!\n\
                     Our agent will confirm your slot shortly. You can also send\n\
                     your name, phone, date (YYYY-MM-DD) and time (HH:MM) on\n\
                     separate lines to book a calendar slot right away.",
                    property_name
                )),
                effects: vec![SideEffect::UpdateStatus {
                    phone: session.phone().clone(),
                    status: InteractionStatus::VisitScheduled,
                    schedule_note: Some(note),
                }],
            };
        }

        Turn::reply_only(Reply::text(prompt_for(session.step)))
    }
}

// Forward moves go through the validated table; an inconsistency here is a
// programming error, so fall back to the target rather than panic.
fn advance(current: ConversationStep, target: ConversationStep) -> ConversationStep {
    current.transition_to(target).unwrap_or(target)
}

const SCHEDULE_PROMPT: &str = "📅 Would you like to schedule a visit?\n\
     Reply 'yes' (optionally with your preferred day), or send your name,\n\
     phone, date (YYYY-MM-DD) and time (HH:MM) on separate lines.";

fn prompt_for(step: ConversationStep) -> String {
    match step {
        ConversationStep::Start => {
            "👋 Welcome to the Estate Concierge! Say anything to begin.".to_string()
        }
        ConversationStep::CollectingPropertyType => {
            "🏠 What type of property are you looking for? (e.g. 2BHK, 3BHK)".to_string()
        }
        ConversationStep::CollectingBudget => {
            "💰 Please share a budget amount, like 80L or 1.5cr.".to_string()
        }
        ConversationStep::CollectingLocation => {
            "📍 Which location would you like?".to_string()
        }
        ConversationStep::PresentingDetails => {
            "🔢 Reply with a property number or its exact name for details.".to_string()
        }
        ConversationStep::SchedulingVisit => SCHEDULE_PROMPT.to_string(),
    }
}

fn render_result_list(location: &str, results: &[PropertyRecord]) -> String {
    let mut out = format!("🏠 Property options for {}:\n\n", location);
    for (i, record) in results.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n   📍 {}\n   💰 {}\n   ✨ {}\n\n",
            i + 1,
            record.name,
            record.location,
            record.price_display,
            record.bhk_label(),
        ));
    }
    out.push_str("Reply with:\n- a property number for details\n- 'back' to change the search");
    out
}

fn render_details(record: &PropertyRecord) -> String {
    format!(
        "🏠 {}\n\n📍 Location: {}\n💰 Price: {}\n🛏 {}\n📝 {}",
        record.name, record.location, record.price_display, record.bhk_label(), record.description,
    )
}

// A booking block is at least four non-empty lines: name, phone, date,
// time. Anything else falls through to the lighter "yes" path.
fn parse_visit_block(message: &str, property_name: &str) -> Option<VisitRequest> {
    let lines: Vec<&str> = message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 4 {
        return None;
    }
    let date = lines[2];
    let time = lines[3];
    let date_ok = date.len() == 10 && date.chars().filter(|c| *c == '-').count() == 2;
    let time_ok = time.len() == 5 && time.contains(':');
    if !date_ok || !time_ok {
        return None;
    }
    Some(VisitRequest {
        property_name: property_name.to_string(),
        visitor_name: lines[0].to_string(),
        visitor_phone: lines[1].to_string(),
        date: date.to_string(),
        time: time.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::PropertyRow;

    fn catalog() -> PropertyCatalog {
        PropertyCatalog::from_rows(vec![
            PropertyRow {
                name: "Luxury Sea View Apartment".to_string(),
                price: "2.5cr".to_string(),
                location: "Bandra, Mumbai".to_string(),
                bhk: "3BHK".to_string(),
                description: "Panoramic sea views.".to_string(),
                images: "https://img/a1.jpg,https://img/a2.jpg".to_string(),
            },
            PropertyRow {
                name: "Modern Studio Apartment".to_string(),
                price: "85L".to_string(),
                location: "Andheri, Mumbai".to_string(),
                bhk: "1BHK".to_string(),
                description: "Smart home fittings.".to_string(),
                images: "https://img/b1.jpg".to_string(),
            },
            PropertyRow {
                name: "Family Villa".to_string(),
                price: "3.2cr".to_string(),
                location: "Powai, Mumbai".to_string(),
                bhk: "3BHK".to_string(),
                description: "Terrace and parking.".to_string(),
                images: String::new(),
            },
        ])
    }

    fn session() -> ConversationSession {
        ConversationSession::new(PhoneNumber::new("whatsapp:+919812345678").unwrap())
    }

    /// Drives a session to PresentingDetails with the standard funnel.
    fn qualified_session(engine: &ConversationEngine, catalog: &PropertyCatalog) -> ConversationSession {
        let mut s = session();
        engine.handle(&mut s, "hi", catalog);
        engine.handle(&mut s, "3bhk", catalog);
        engine.handle(&mut s, "1.5cr", catalog);
        engine.handle(&mut s, "Mumbai", catalog);
        s
    }

    mod greeting {
        use super::*;

        #[test]
        fn start_ignores_content_and_greets() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();

            // Even a valid room-type answer only earns the greeting here.
            let turn = engine.handle(&mut s, "3bhk", &catalog);

            assert!(turn.reply.joined_body().contains("Welcome"));
            assert_eq!(s.step, ConversationStep::CollectingPropertyType);
            assert!(s.criteria.property_type.is_none());
        }

        #[test]
        fn room_type_advances_only_after_greeting() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();

            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "3bhk", &catalog);

            assert_eq!(s.step, ConversationStep::CollectingBudget);
            assert_eq!(s.criteria.property_type.as_deref(), Some("3bhk"));
        }
    }

    mod property_type {
        use super::*;

        #[test]
        fn non_bhk_message_reprompts_without_advancing() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);

            let turn = engine.handle(&mut s, "something nice", &catalog);

            assert_eq!(s.step, ConversationStep::CollectingPropertyType);
            assert!(turn.reply.joined_body().contains("type of property"));
        }
    }

    mod budget {
        use super::*;

        #[test]
        fn parseable_budget_advances() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "2bhk", &catalog);

            engine.handle(&mut s, "80L", &catalog);

            assert_eq!(s.step, ConversationStep::CollectingLocation);
            assert_eq!(s.criteria.budget, Some(8_000_000));
        }

        #[test]
        fn invalid_budget_reprompts() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "2bhk", &catalog);

            let turn = engine.handle(&mut s, "cheap please", &catalog);

            assert_eq!(s.step, ConversationStep::CollectingBudget);
            assert!(turn.reply.joined_body().contains("budget"));
        }
    }

    mod location_and_results {
        use super::*;

        #[test]
        fn location_presents_numbered_list_and_records_search() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "3bhk", &catalog);
            engine.handle(&mut s, "1.5cr", &catalog);

            let turn = engine.handle(&mut s, "Mumbai", &catalog);

            assert_eq!(s.step, ConversationStep::PresentingDetails);
            assert_eq!(s.criteria.location.as_deref(), Some("Mumbai"));
            let body = turn.reply.joined_body();
            assert!(body.contains("1. Luxury Sea View Apartment"));
            assert!(body.contains("3. Family Villa"));
            match &turn.effects[..] {
                [SideEffect::Record(record)] => {
                    assert_eq!(record.status, InteractionStatus::Searching);
                    assert_eq!(record.location, "Mumbai");
                    assert_eq!(record.budget, 15_000_000);
                }
                other => panic!("expected one Record effect, got {:?}", other),
            }
        }

        #[test]
        fn budget_does_not_filter_results() {
            // Budget "50" is far below every listing; the list still shows
            // the full catalog. Known gap, asserted as current behavior.
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "3bhk", &catalog);
            engine.handle(&mut s, "50", &catalog);
            engine.handle(&mut s, "Mumbai", &catalog);

            assert_eq!(s.results.len(), catalog.records().len());
        }

        #[test]
        fn digit_heavy_location_is_taken_as_free_text() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "3bhk", &catalog);
            engine.handle(&mut s, "1cr", &catalog);

            engine.handle(&mut s, "1 Main St", &catalog);

            assert_eq!(s.criteria.location.as_deref(), Some("1 Main St"));
            assert_eq!(s.step, ConversationStep::PresentingDetails);
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn index_selection_shows_details_and_images() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = qualified_session(&engine, &catalog);

            let turn = engine.handle(&mut s, "1", &catalog);

            assert_eq!(s.step, ConversationStep::SchedulingVisit);
            assert_eq!(s.selected.as_ref().unwrap().name, "Luxury Sea View Apartment");
            assert_eq!(turn.reply.segments[0].media.len(), 2);
            assert!(turn.reply.joined_body().contains("₹2.5 Cr"));
            assert!(matches!(
                turn.effects[..],
                [SideEffect::UpdateStatus {
                    status: InteractionStatus::PropertySelected,
                    ..
                }]
            ));
        }

        #[test]
        fn index_and_lowercased_name_select_the_same_record() {
            let engine = ConversationEngine::new();
            let catalog = catalog();

            let mut by_index = qualified_session(&engine, &catalog);
            engine.handle(&mut by_index, "1", &catalog);

            let mut by_name = qualified_session(&engine, &catalog);
            engine.handle(&mut by_name, "luxury sea view apartment", &catalog);

            assert_eq!(by_index.selected, by_name.selected);
        }

        #[test]
        fn out_of_range_index_reprompts() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = qualified_session(&engine, &catalog);

            let turn = engine.handle(&mut s, "7", &catalog);

            assert_eq!(s.step, ConversationStep::PresentingDetails);
            assert!(s.selected.is_none());
            assert!(turn.reply.joined_body().contains("couldn't find"));
        }

        #[test]
        fn unknown_name_reprompts() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = qualified_session(&engine, &catalog);

            engine.handle(&mut s, "castle in the sky", &catalog);

            assert_eq!(s.step, ConversationStep::PresentingDetails);
            assert!(s.selected.is_none());
        }
    }

    mod scheduling {
        use super::*;

        fn selected_session(engine: &ConversationEngine, catalog: &PropertyCatalog) -> ConversationSession {
            let mut s = qualified_session(engine, catalog);
            engine.handle(&mut s, "1", catalog);
            s
        }

        #[test]
        fn yes_records_visit_with_suffix() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = selected_session(&engine, &catalog);

            let turn = engine.handle(&mut s, "Yes, Saturday morning", &catalog);

            assert_eq!(s.step, ConversationStep::SchedulingVisit);
            match &turn.effects[..] {
                [SideEffect::UpdateStatus {
                    status: InteractionStatus::VisitScheduled,
                    schedule_note: Some(note),
                    ..
                }] => assert_eq!(note, "saturday morning"),
                other => panic!("expected VisitScheduled update, got {:?}", other),
            }
            assert!(turn.reply.joined_body().contains("Visit request noted"));
        }

        #[test]
        fn yes_suffix_note_drops_leading_punctuation() {
            let engine = ConversationEngine::new();
            let catalog = catalog();

            for (message, expected) in [
                ("Yes, Saturday morning", "saturday morning"),
                ("yes - sunday 11am", "sunday 11am"),
                ("yes", ""),
            ] {
                let mut s = selected_session(&engine, &catalog);
                let turn = engine.handle(&mut s, message, &catalog);
                match &turn.effects[..] {
                    [SideEffect::UpdateStatus {
                        schedule_note: Some(note),
                        ..
                    }] => assert_eq!(note, expected, "message: {message:?}"),
                    other => panic!("expected VisitScheduled update, got {:?}", other),
                }
            }
        }

        #[test]
        fn four_line_block_requests_calendar_booking() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = selected_session(&engine, &catalog);

            let turn = engine.handle(
                &mut s,
                "Asha Rao\n+919812345678\n2026-09-01\n14:00",
                &catalog,
            );

            let schedule = turn
                .effects
                .iter()
                .find_map(|e| match e {
                    SideEffect::ScheduleVisit(request) => Some(request.clone()),
                    _ => None,
                })
                .expect("ScheduleVisit effect");
            assert_eq!(schedule.property_name, "Luxury Sea View Apartment");
            assert_eq!(schedule.date, "2026-09-01");
            assert_eq!(schedule.time, "14:00");
            assert!(turn.effects.iter().any(|e| matches!(
                e,
                SideEffect::UpdateStatus {
                    status: InteractionStatus::VisitScheduled,
                    ..
                }
            )));
        }

        #[test]
        fn malformed_block_reprompts() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = selected_session(&engine, &catalog);

            let turn = engine.handle(&mut s, "Asha Rao\n+919812345678", &catalog);

            assert!(turn.effects.is_empty());
            assert!(turn.reply.joined_body().contains("schedule a visit"));
        }
    }

    mod pseudo_transitions {
        use super::*;

        #[test]
        fn back_from_budget_returns_exactly_to_property_type() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = session();
            engine.handle(&mut s, "hi", &catalog);
            engine.handle(&mut s, "3bhk", &catalog);
            assert_eq!(s.step, ConversationStep::CollectingBudget);

            engine.handle(&mut s, "back", &catalog);

            assert_eq!(s.step, ConversationStep::CollectingPropertyType);
        }

        #[test]
        fn repeated_back_walks_one_hop_at_a_time() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = qualified_session(&engine, &catalog);
            assert_eq!(s.step, ConversationStep::PresentingDetails);

            engine.handle(&mut s, "back", &catalog);
            assert_eq!(s.step, ConversationStep::CollectingLocation);
            engine.handle(&mut s, "back", &catalog);
            assert_eq!(s.step, ConversationStep::CollectingBudget);
        }

        #[test]
        fn start_resets_criteria_results_and_selection() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = qualified_session(&engine, &catalog);
            engine.handle(&mut s, "1", &catalog);
            assert!(s.selected.is_some());

            engine.handle(&mut s, "start", &catalog);

            assert_eq!(s.step, ConversationStep::Start);
            assert!(s.criteria.budget.is_none());
            assert!(s.criteria.location.is_none());
            assert!(s.results.is_empty());
            assert!(s.selected.is_none());
        }

        #[test]
        fn start_is_matched_case_insensitively() {
            let engine = ConversationEngine::new();
            let catalog = catalog();
            let mut s = qualified_session(&engine, &catalog);

            engine.handle(&mut s, "START", &catalog);

            assert_eq!(s.step, ConversationStep::Start);
        }
    }
}
