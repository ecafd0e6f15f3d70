//! End-to-end webhook tests: form-encoded POSTs in, TwiML XML out.
//!
//! Runs the full funnel through the axum router with in-memory sessions
//! and mocked sheet/calendar ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::ServiceExt;

use estate_concierge::adapters::http::webhook::{webhook_router, WebhookAppState};
use estate_concierge::adapters::storage::InMemorySessionStore;
use estate_concierge::application::HandleInboundMessage;
use estate_concierge::domain::catalog::{PropertyCatalog, PropertyRow};
use estate_concierge::domain::conversation::{
    InteractionRecord, InteractionStatus, VisitRequest,
};
use estate_concierge::domain::foundation::{DomainError, PhoneNumber};
use estate_concierge::ports::{
    InteractionRecorder, ScheduleError, ScheduledVisit, VisitScheduler,
};

#[derive(Default)]
struct RecordingRecorder {
    appended: Mutex<Vec<InteractionRecord>>,
    status_updates: Mutex<Vec<(InteractionStatus, Option<String>)>>,
}

#[async_trait]
impl InteractionRecorder for RecordingRecorder {
    async fn append(&self, record: InteractionRecord) -> Result<(), DomainError> {
        self.appended.lock().unwrap().push(record);
        Ok(())
    }

    async fn update_latest_status(
        &self,
        _phone: &PhoneNumber,
        status: InteractionStatus,
        schedule_note: Option<String>,
    ) -> Result<(), DomainError> {
        self.status_updates
            .lock()
            .unwrap()
            .push((status, schedule_note));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingScheduler {
    requests: Mutex<Vec<VisitRequest>>,
}

#[async_trait]
impl VisitScheduler for RecordingScheduler {
    async fn schedule(&self, request: VisitRequest) -> Result<ScheduledVisit, ScheduleError> {
        self.requests.lock().unwrap().push(request);
        Ok(ScheduledVisit {
            event_id: "evt_123".to_string(),
        })
    }
}

fn test_catalog() -> PropertyCatalog {
    PropertyCatalog::from_rows(vec![
        PropertyRow {
            name: "Luxury Sea View Apartment".to_string(),
            price: "2.5cr".to_string(),
            location: "Bandra, Mumbai".to_string(),
            bhk: "3BHK".to_string(),
            description: "Panoramic sea views.".to_string(),
            images: "https://img.example/a1.jpg".to_string(),
        },
        PropertyRow {
            name: "Modern Studio Apartment".to_string(),
            price: "85L".to_string(),
            location: "Andheri, Mumbai".to_string(),
            bhk: "1BHK".to_string(),
            description: "Smart home fittings.".to_string(),
            images: String::new(),
        },
    ])
}

struct TestApp {
    router: Router,
    recorder: Arc<RecordingRecorder>,
    scheduler: Arc<RecordingScheduler>,
}

fn test_app() -> TestApp {
    let recorder = Arc::new(RecordingRecorder::default());
    let scheduler = Arc::new(RecordingScheduler::default());
    let handler = Arc::new(HandleInboundMessage::new(
        Arc::new(InMemorySessionStore::new()),
        recorder.clone(),
        scheduler.clone(),
        Arc::new(RwLock::new(test_catalog())),
    ));
    let router = webhook_router().with_state(WebhookAppState { handler });
    TestApp {
        router,
        recorder,
        scheduler,
    }
}

async fn post_message(router: &Router, from: &str, body: &str) -> (StatusCode, String) {
    let form = serde_urlencoded::to_string([("From", from), ("Body", body)]).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/webhook/whatsapp")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let app = test_app();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn first_message_greets_with_twiml() {
    let app = test_app();
    let (status, xml) = post_message(&app.router, "whatsapp:+919812345678", "hi").await;

    assert_eq!(status, StatusCode::OK);
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<Response>"));
    assert!(xml.contains("Welcome"));
}

#[tokio::test]
async fn invalid_sender_still_gets_200_apology() {
    let app = test_app();
    let (status, xml) = post_message(&app.router, "not a phone", "hi").await;

    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("<Response>"));
    assert!(xml.contains("Sorry"));
}

#[tokio::test]
async fn full_funnel_reaches_property_list_and_logs_search() {
    let app = test_app();
    let from = "whatsapp:+919812345678";

    post_message(&app.router, from, "hello").await;
    post_message(&app.router, from, "3bhk").await;
    post_message(&app.router, from, "1.5cr").await;
    let (_, xml) = post_message(&app.router, from, "Mumbai").await;

    assert!(xml.contains("Luxury Sea View Apartment"));
    assert!(xml.contains("Modern Studio Apartment"));

    let appended = app.recorder.appended.lock().unwrap();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].property_type, "3bhk");
    assert_eq!(appended[0].location, "Mumbai");
}

#[tokio::test]
async fn selection_returns_details_with_media() {
    let app = test_app();
    let from = "whatsapp:+919812345678";

    for text in ["hi", "3bhk", "2cr", "Mumbai"] {
        post_message(&app.router, from, text).await;
    }
    let (_, xml) = post_message(&app.router, from, "1").await;

    assert!(xml.contains("Luxury Sea View Apartment"));
    assert!(xml.contains("<Media>https://img.example/a1.jpg</Media>"));
    assert!(xml.contains("schedule a visit"));

    let updates = app.recorder.status_updates.lock().unwrap();
    assert!(updates
        .iter()
        .any(|(status, _)| *status == InteractionStatus::PropertySelected));
}

#[tokio::test]
async fn visit_block_books_calendar_event() {
    let app = test_app();
    let from = "whatsapp:+919812345678";

    for text in ["hi", "3bhk", "2cr", "Mumbai", "1"] {
        post_message(&app.router, from, text).await;
    }
    let (_, xml) = post_message(
        &app.router,
        from,
        "Asha Rao\n+919812345678\n2026-09-05\n11:00",
    )
    .await;

    assert!(xml.contains("Visit scheduled"));
    assert!(xml.contains("Duration: 1 hour"));

    let requests = app.scheduler.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].property_name, "Luxury Sea View Apartment");
    assert_eq!(requests[0].date, "2026-09-05");
    assert_eq!(requests[0].time, "11:00");

    let updates = app.recorder.status_updates.lock().unwrap();
    assert!(updates
        .iter()
        .any(|(status, note)| *status == InteractionStatus::VisitScheduled
            && note.as_deref() == Some("2026-09-05 11:00")));
}

#[tokio::test]
async fn sessions_are_isolated_per_sender() {
    let app = test_app();

    post_message(&app.router, "whatsapp:+919812345678", "hi").await;
    post_message(&app.router, "whatsapp:+919812345678", "3bhk").await;

    // A fresh sender starts at the greeting, not mid-funnel.
    let (_, xml) = post_message(&app.router, "whatsapp:+918887776665", "hi").await;
    assert!(xml.contains("Welcome"));
}

#[tokio::test]
async fn back_returns_to_previous_prompt() {
    let app = test_app();
    let from = "whatsapp:+919812345678";

    post_message(&app.router, from, "hi").await;
    post_message(&app.router, from, "3bhk").await;
    let (_, xml) = post_message(&app.router, from, "back").await;

    assert!(xml.contains("type of property"));
}
