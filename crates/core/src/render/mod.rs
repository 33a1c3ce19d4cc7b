//! HTML rendering for the dashboard page.
//!
//! Components are pure functions from borrowed data to markup. Every piece
//! of text that originates outside this module passes through [`escape`].

pub mod json_viewer;
pub mod metric_card;
pub mod page;
pub mod risk_badge;
pub mod text;

pub use json_viewer::{format_json, json_viewer};
pub use metric_card::metric_card;
pub use page::page;
pub use risk_badge::risk_badge;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
