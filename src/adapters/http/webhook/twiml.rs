//! TwiML reply rendering.
//!
//! The transport expects an XML document with one `<Message>` per reply
//! segment; media URLs become `<Media>` children. Only the five standard
//! XML entities need escaping, so this stays hand-rolled.

use crate::domain::conversation::Reply;

/// Renders a reply as a TwiML messaging response.
pub fn render_twiml(reply: &Reply) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>");
    for segment in &reply.segments {
        out.push_str("<Message><Body>");
        out.push_str(&escape_xml(&segment.body));
        out.push_str("</Body>");
        for url in &segment.media {
            out.push_str("<Media>");
            out.push_str(&escape_xml(url));
            out.push_str("</Media>");
        }
        out.push_str("</Message>");
    }
    out.push_str("</Response>");
    out
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
