//! Outbound reply value objects.
//!
//! The engine emits an ordered sequence of text segments; each segment may
//! carry image URLs as a distinct attachment channel. The transport decides
//! how to pack segments into messages.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MAX_IMAGES_PER_PROPERTY;

/// One outbound text segment with optional media attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplySegment {
    pub body: String,
    /// Image URLs, capped at ten per segment.
    pub media: Vec<String>,
}

impl ReplySegment {
    /// Creates a text-only segment.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            media: Vec::new(),
        }
    }

    /// Creates a segment with media, truncating past the per-turn cap.
    pub fn with_media(body: impl Into<String>, media: impl IntoIterator<Item = String>) -> Self {
        Self {
            body: body.into(),
            media: media.into_iter().take(MAX_IMAGES_PER_PROPERTY).collect(),
        }
    }
}

/// Ordered sequence of segments making up one turn's reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub segments: Vec<ReplySegment>,
}

impl Reply {
    /// Creates a reply with a single text segment.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            segments: vec![ReplySegment::text(body)],
        }
    }

    /// Appends a segment, returning self for chaining.
    pub fn and(mut self, segment: ReplySegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: ReplySegment) {
        self.segments.push(segment);
    }

    /// Concatenated bodies, used by tests and logging.
    pub fn joined_body(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
