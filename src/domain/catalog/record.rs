//! Property record value objects.

use serde::{Deserialize, Serialize};

use crate::domain::currency::{format_inr, parse_amount, parse_bhk};

/// Loosely-typed listing row as it arrives from the external store.
///
/// All columns are free text; `images` is a comma-joined URL list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyRow {
    pub name: String,
    pub price: String,
    pub location: String,
    pub bhk: String,
    pub description: String,
    pub images: String,
}

impl PropertyRow {
    /// Normalizes this row into a typed record.
    ///
    /// `index` is the 0-based position in the source, used to derive a
    /// stable id. Unparseable price or BHK text normalizes to 0 rather
    /// than failing the whole load.
    pub fn normalize(self, index: usize) -> PropertyRecord {
        let price = parse_amount(&self.price);
        PropertyRecord {
            id: format!("property{}", index + 1),
            name: self.name.trim().to_string(),
            price,
            price_display: format_inr(price),
            location: self.location.trim().to_string(),
            bhk: parse_bhk(&self.bhk),
            description: self.description.trim().to_string(),
            images: self
                .images
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Immutable, fully-normalized property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    pub name: String,
    /// Whole rupees; 0 means the source price was unreadable.
    pub price: i64,
    /// Pre-rendered price label, e.g. "₹2.5 Cr".
    pub price_display: String,
    pub location: String,
    pub bhk: u32,
    pub description: String,
    pub images: Vec<String>,
}

impl PropertyRecord {
    /// Short BHK label for list rendering, e.g. "3BHK".
    pub fn bhk_label(&self) -> String {
        format!("{}BHK", self.bhk)
    }
}
