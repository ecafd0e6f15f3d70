//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `ESTATE_CONCIERGE` prefix and nested keys use double underscores.
//!
//! # Example
//!
//! ```no_run
//! use estate_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod calendar;
mod error;
mod server;
mod sheets;

pub use calendar::CalendarConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use sheets::SheetsConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings (host, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Google Sheets settings (catalog + interaction log)
    pub sheets: SheetsConfig,

    /// Google Calendar settings (visit scheduling)
    pub calendar: CalendarConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `ESTATE_CONCIERGE` prefix, `__` separating nested keys:
    ///
    /// - `ESTATE_CONCIERGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ESTATE_CONCIERGE__SHEETS__SPREADSHEET_ID=...` -> `sheets.spreadsheet_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ESTATE_CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` on the first invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.sheets.validate()?;
        self.calendar.validate()?;
        Ok(())
    }
}
