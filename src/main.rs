//! Binary entrypoint: wires configuration, adapters, and the HTTP server.

use std::sync::Arc;

use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use estate_concierge::adapters::calendar::GoogleCalendarScheduler;
use estate_concierge::adapters::http::webhook::{webhook_router, WebhookAppState};
use estate_concierge::adapters::sheets::{SheetInteractionRecorder, SheetPropertySource};
use estate_concierge::adapters::storage::InMemorySessionStore;
use estate_concierge::application::{load_catalog, HandleInboundMessage};
use estate_concierge::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,estate_concierge=debug")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let client = reqwest::Client::new();

    let property_source = SheetPropertySource::new(
        client.clone(),
        config.sheets.spreadsheet_id.clone(),
        config.sheets.property_range.clone(),
        config.sheets.token.clone(),
    );
    let recorder = Arc::new(SheetInteractionRecorder::new(
        client.clone(),
        config.sheets.spreadsheet_id.clone(),
        config.sheets.interaction_sheet.clone(),
        config.sheets.token.clone(),
    ));
    let scheduler = Arc::new(GoogleCalendarScheduler::new(
        client,
        config.calendar.calendar_id.clone(),
        config.calendar.timezone.clone(),
        config.calendar.token.clone(),
    ));
    let sessions = Arc::new(InMemorySessionStore::new());

    // One catalog fetch at startup; serving continues on the fallback
    // record if the sheet is unreachable.
    let catalog = load_catalog(&property_source).await;
    if catalog.records().len() == 1 {
        warn!("catalog holds a single record; check the property sheet if more were expected");
    }
    let catalog = Arc::new(RwLock::new(catalog));

    let handler = Arc::new(HandleInboundMessage::new(
        sessions,
        recorder,
        scheduler,
        catalog,
    ));

    let app = webhook_router()
        .with_state(WebhookAppState { handler })
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    info!(%addr, "starting webhook server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
