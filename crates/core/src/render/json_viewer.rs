use super::escape;
use serde_json::Value;

/// Pretty-prints `value` with two-space indentation, keeping key order.
pub fn format_json(value: &Value) -> String {
    // Serializing a `Value` into a String cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn json_viewer(value: &Value) -> String {
    format!(
        r#"<pre class="json-viewer">{}</pre>"#,
        escape(&format_json(value))
    )
}
