//! Google Sheets adapters.
//!
//! The property catalog is read from one spreadsheet tab; interaction
//! rows are appended to another. Both go through the Sheets values REST
//! API with a bearer token.

mod interaction_recorder;
mod property_source;

pub use interaction_recorder::SheetInteractionRecorder;
pub use property_source::SheetPropertySource;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Converts a raw API cell into text. The values API can hand back
/// strings, numbers, or booleans depending on cell formatting.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_text_handles_strings_numbers_and_blanks() {
        assert_eq!(cell_text(&json!("Bandra")), "Bandra");
        assert_eq!(cell_text(&json!(2)), "2");
        assert_eq!(cell_text(&json!(null)), "");
    }
}
