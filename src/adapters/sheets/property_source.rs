//! Spreadsheet-backed property source.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::domain::catalog::PropertyRow;
use crate::ports::{PropertySource, SourceError};

use super::{cell_text, SHEETS_API_BASE};

/// Reads listing rows from a Google Sheets tab.
///
/// The first row must be a header naming the columns
/// `name, price, location, bhk, description, images` in any order.
pub struct SheetPropertySource {
    client: reqwest::Client,
    spreadsheet_id: String,
    range: String,
    token: SecretString,
}

impl SheetPropertySource {
    pub fn new(
        client: reqwest::Client,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        token: SecretString,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[async_trait]
impl PropertySource for SheetPropertySource {
    async fn fetch_rows(&self) -> Result<Vec<PropertyRow>, SourceError> {
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_API_BASE, self.spreadsheet_id, self.range
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Request(format!(
                "sheets returned status {}",
                response.status()
            )));
        }

        let payload: ValueRange = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let rows = rows_from_values(&payload.values);
        debug!(count = rows.len(), "fetched property rows");
        Ok(rows)
    }
}

/// Maps header-addressed sheet values into listing rows.
///
/// Header matching is case-insensitive; missing columns yield empty
/// fields, which the catalog normalizer already tolerates.
fn rows_from_values(values: &[Vec<serde_json::Value>]) -> Vec<PropertyRow> {
    let Some((header, data)) = values.split_first() else {
        return Vec::new();
    };

    let column = |name: &str| -> Option<usize> {
        header
            .iter()
            .position(|cell| cell_text(cell).trim().eq_ignore_ascii_case(name))
    };
    let columns = [
        column("name"),
        column("price"),
        column("location"),
        column("bhk"),
        column("description"),
        column("images"),
    ];

    let field = |row: &[serde_json::Value], index: Option<usize>| -> String {
        index
            .and_then(|i| row.get(i))
            .map(cell_text)
            .unwrap_or_default()
    };

    data.iter()
        .map(|row| PropertyRow {
            name: field(row, columns[0]),
            price: field(row, columns[1]),
            location: field(row, columns[2]),
            bhk: field(row, columns[3]),
            description: field(row, columns[4]),
            images: field(row, columns[5]),
        })
        .collect()
}
