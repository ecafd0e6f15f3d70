//! Property catalog - normalized listings and lookups.

mod record;

pub use record::{PropertyRecord, PropertyRow};

use once_cell::sync::Lazy;

/// Maximum images attached per displayed property.
pub const MAX_IMAGES_PER_PROPERTY: usize = 10;

// Built-in record served when the spreadsheet backend is unreachable or
// empty. The bot must always have something to offer.
static FALLBACK_RECORD: Lazy<PropertyRecord> = Lazy::new(|| {
    PropertyRow {
        name: "Green Valley Residency".to_string(),
        price: "95L".to_string(),
        location: "Baner, Pune".to_string(),
        bhk: "2BHK".to_string(),
        description: "Ready-to-move 2BHK with clubhouse access, covered parking and \
                      24/7 security."
            .to_string(),
        images: "https://example.com/properties/pune/green-valley-1.jpg".to_string(),
    }
    .normalize(0)
});

/// Immutable set of property listings.
///
/// Built once from external rows (or the fallback) and replaced wholesale
/// on reload; individual records are never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCatalog {
    records: Vec<PropertyRecord>,
}

impl PropertyCatalog {
    /// Builds a catalog from loosely-typed external rows.
    ///
    /// Price and BHK text is normalized here, at load time, so downstream
    /// code deals only with typed fields. Rows with an empty name are
    /// skipped.
    pub fn from_rows(rows: Vec<PropertyRow>) -> Self {
        let records = rows
            .into_iter()
            .filter(|row| !row.name.trim().is_empty())
            .enumerate()
            .map(|(index, row)| row.normalize(index))
            .collect();
        Self { records }
    }

    /// Builds the single-record fallback catalog.
    ///
    /// Used when the property source fails or returns nothing; the choice
    /// to degrade rather than go silent is deliberate and logged by the
    /// caller.
    pub fn fallback() -> Self {
        Self {
            records: vec![FALLBACK_RECORD.clone()],
        }
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all records in load order.
    ///
    /// Criteria collected earlier in the funnel (budget, location) do not
    /// narrow this list; that gap is longstanding bot behavior and is kept
    /// as-is.
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    /// Looks up a record by 1-based menu index into a presented list.
    pub fn find_by_index(list: &[PropertyRecord], index: usize) -> Option<&PropertyRecord> {
        if index == 0 {
            return None;
        }
        list.get(index - 1)
    }

    /// Looks up a record by display name within a presented list,
    /// case-insensitive exact match.
    pub fn find_by_name<'a>(list: &'a [PropertyRecord], name: &str) -> Option<&'a PropertyRecord> {
        let wanted = name.trim().to_lowercase();
        list.iter()
            .find(|record| record.name.to_lowercase() == wanted)
    }
}
