//! Plain-terminal rendering of a report, used by the command-line client.

use super::format_json;
use crate::domain::report::{AnalysisResult, RiskBucket};
use crate::domain::ticker::Ticker;

const RESET: &str = "\x1b[0m";

fn ansi_color(bucket: RiskBucket) -> &'static str {
    match bucket {
        RiskBucket::Low => "\x1b[1;32m",
        RiskBucket::Medium => "\x1b[1;33m",
        RiskBucket::High => "\x1b[1;31m",
        RiskBucket::Unknown => "\x1b[1;37m",
    }
}

pub fn risk_badge(bucket: RiskBucket, color: bool) -> String {
    let label = bucket.as_str().to_ascii_uppercase();
    if color {
        format!("{}[{label}]{RESET}", ansi_color(bucket))
    } else {
        format!("[{label}]")
    }
}

pub fn metric_line(label: &str, value: &str) -> String {
    format!("{label:<14}{value}")
}

pub fn report(ticker: Ticker, result: &AnalysisResult, color: bool, with_json: bool) -> String {
    let report = &result.report;

    let mut lines = vec![
        format!("{} ({})", ticker.label(), ticker.as_str()),
        metric_line("Final Signal", &report.signal),
        metric_line("Confidence", &report.confidence),
    ];
    if let Some(score) = report.risk_score {
        lines.push(metric_line("Risk Score", &score.to_string()));
    }
    lines.push(metric_line("Risk Bucket", &risk_badge(report.risk_bucket, color)));
    if let Some(date) = &report.date {
        lines.push(metric_line("As Of", date));
    }
    if let Some(news_count) = report.news_count {
        lines.push(metric_line("News Items", &news_count.to_string()));
    }
    if let Some(generated_at) = report.generated_at {
        lines.push(metric_line(
            "Generated",
            &generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ));
    }
    if let Some(system) = &report.system {
        lines.push(metric_line("System", system));
    }

    let mut out = lines.join("\n");
    out.push_str("\n\nModel + Context Explanation\n");
    out.push_str(&report.summary);
    out.push('\n');

    if with_json {
        out.push('\n');
        out.push_str(&format_json(&result.raw));
        out.push('\n');
    }
    out
}
