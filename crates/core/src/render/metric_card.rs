use super::escape;

/// A labeled value tile. The value is shown as given, never reformatted.
pub fn metric_card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric-card"><span class="metric-label">{}</span><span class="metric-value">{}</span></div>"#,
        escape(label),
        escape(value)
    )
}
