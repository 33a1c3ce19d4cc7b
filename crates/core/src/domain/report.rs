use anyhow::{ensure, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Coarse volatility risk classification reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBucket {
    Low,
    Medium,
    High,
    /// Anything the service sends outside the three known buckets,
    /// including a missing bucket.
    #[default]
    Unknown,
}

impl RiskBucket {
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => RiskBucket::Low,
            "medium" => RiskBucket::Medium,
            "high" => RiskBucket::High,
            _ => RiskBucket::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskBucket::Low => "low",
            RiskBucket::Medium => "medium",
            RiskBucket::High => "high",
            RiskBucket::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RiskBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .map(RiskBucket::parse_lenient)
            .unwrap_or(RiskBucket::Unknown))
    }
}

/// Typed view over the fields the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub ticker: Option<String>,
    pub date: Option<String>,
    pub signal: String,
    pub confidence: String,
    pub risk_bucket: RiskBucket,
    pub risk_score: Option<f64>,
    pub summary: String,
    pub news_count: Option<u64>,
    pub generated_at: Option<DateTime<Utc>>,
    pub system: Option<String>,
}

/// A decoded report together with the exact payload the service returned.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub report: AnalysisReport,
    pub raw: Value,
}

pub fn decode_analysis(raw: Value) -> anyhow::Result<AnalysisResult> {
    let wire = WireReport::deserialize(&raw)
        .context("analysis response does not match the report shape")?;
    let report = wire.validate_and_into_report()?;
    Ok(AnalysisResult { report, raw })
}

#[derive(Debug, Deserialize)]
struct WireReport {
    #[serde(default)]
    ticker: Option<String>,
    #[serde(default)]
    date: Option<String>,
    model: WireModel,
    final_decision: WireFinalDecision,
    explanation: WireExplanation,
    #[serde(default)]
    metadata: Option<WireMetadata>,
}

#[derive(Debug, Deserialize)]
struct WireModel {
    #[serde(default)]
    risk_bucket: RiskBucket,
    #[serde(default)]
    risk_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireFinalDecision {
    signal: String,
    confidence: Scalar,
}

#[derive(Debug, Deserialize)]
struct WireExplanation {
    summary: String,
    #[serde(default)]
    news_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireMetadata {
    #[serde(default)]
    generated_at: Option<String>,
    #[serde(default)]
    system: Option<String>,
}

/// Confidence is a string in the service contract; a bare number is
/// kept as its literal JSON text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }
}

impl WireReport {
    fn validate_and_into_report(self) -> anyhow::Result<AnalysisReport> {
        // Values are displayed exactly as sent; blank checks only.
        let signal = self.final_decision.signal;
        ensure!(!signal.trim().is_empty(), "final_decision.signal must be non-empty");

        let confidence = self.final_decision.confidence.into_text();
        let summary = self.explanation.summary;

        let (generated_at, system) = match self.metadata {
            Some(meta) => {
                // Unparseable timestamps are dropped rather than failing the report.
                let generated_at = meta
                    .generated_at
                    .as_deref()
                    .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
                    .map(|dt| dt.with_timezone(&Utc));
                (generated_at, meta.system)
            }
            None => (None, None),
        };

        Ok(AnalysisReport {
            ticker: non_empty(self.ticker),
            date: non_empty(self.date),
            signal,
            confidence,
            risk_bucket: self.model.risk_bucket,
            risk_score: self.model.risk_score,
            summary,
            news_count: self.explanation.news_count,
            generated_at,
            system: non_empty(system),
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn full_report() -> Value {
        json!({
            "ticker": "TCS",
            "date": "2026-01-27",
            "model": {"risk_score": 0.734512, "risk_bucket": "high"},
            "context": {
                "risk_type": "earnings",
                "exogenous_shock": false,
                "alignment": "aligned",
                "confidence_modifier": "increase"
            },
            "final_decision": {"signal": "EXPAND", "confidence": "0.82"},
            "explanation": {"summary": "text", "news_count": 4},
            "metadata": {
                "generated_at": "2026-01-27T10:00:00.123456Z",
                "system": "stock_volatility_ai_v1"
            }
        })
    }

    #[test]
    fn decodes_full_report_and_keeps_raw_payload() {
        let raw = full_report();
        let result = decode_analysis(raw.clone()).unwrap();
        let report = &result.report;

        assert_eq!(result.raw, raw);
        assert_eq!(report.ticker.as_deref(), Some("TCS"));
        assert_eq!(report.signal, "EXPAND");
        assert_eq!(report.confidence, "0.82");
        assert_eq!(report.risk_bucket, RiskBucket::High);
        assert_eq!(report.risk_score, Some(0.734512));
        assert_eq!(report.summary, "text");
        assert_eq!(report.news_count, Some(4));
        assert_eq!(report.system.as_deref(), Some("stock_volatility_ai_v1"));
        let expected = Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap();
        assert_eq!(
            report.generated_at.map(|dt| dt.timestamp()),
            Some(expected.timestamp())
        );
    }

    #[test]
    fn accepts_minimal_report() {
        let raw = json!({
            "model": {"risk_bucket": "low"},
            "final_decision": {"signal": "STABLE", "confidence": "low"},
            "explanation": {"summary": "calm tape"}
        });
        let report = decode_analysis(raw).unwrap().report;
        assert_eq!(report.risk_bucket, RiskBucket::Low);
        assert_eq!(report.ticker, None);
        assert_eq!(report.generated_at, None);
    }

    #[test]
    fn numeric_confidence_is_kept_verbatim() {
        let mut raw = full_report();
        raw["final_decision"]["confidence"] = json!(0.82);
        let report = decode_analysis(raw).unwrap().report;
        assert_eq!(report.confidence, "0.82");
    }

    #[test]
    fn unrecognized_bucket_maps_to_unknown() {
        let mut raw = full_report();
        raw["model"]["risk_bucket"] = json!("extreme");
        assert_eq!(
            decode_analysis(raw).unwrap().report.risk_bucket,
            RiskBucket::Unknown
        );

        let mut raw = full_report();
        raw["model"]["risk_bucket"] = Value::Null;
        assert_eq!(
            decode_analysis(raw).unwrap().report.risk_bucket,
            RiskBucket::Unknown
        );
    }

    #[test]
    fn missing_bucket_maps_to_unknown() {
        let mut raw = full_report();
        raw["model"].as_object_mut().unwrap().remove("risk_bucket");
        assert_eq!(
            decode_analysis(raw).unwrap().report.risk_bucket,
            RiskBucket::Unknown
        );
    }

    #[test]
    fn displayed_strings_keep_their_whitespace() {
        let mut raw = full_report();
        raw["explanation"]["summary"] = json!("\n  indented first line\nsecond\n");
        raw["final_decision"]["confidence"] = json!(" 0.82 ");
        raw["final_decision"]["signal"] = json!(" EXPAND");
        let report = decode_analysis(raw).unwrap().report;
        assert_eq!(report.summary, "\n  indented first line\nsecond\n");
        assert_eq!(report.confidence, " 0.82 ");
        assert_eq!(report.signal, " EXPAND");
    }

    #[test]
    fn bucket_matching_ignores_case() {
        assert_eq!(RiskBucket::parse_lenient("MEDIUM"), RiskBucket::Medium);
        assert_eq!(RiskBucket::parse_lenient(" High "), RiskBucket::High);
    }

    #[test]
    fn rejects_missing_sections() {
        let mut raw = full_report();
        raw.as_object_mut().unwrap().remove("final_decision");
        assert!(decode_analysis(raw).is_err());

        let mut raw = full_report();
        raw["explanation"].as_object_mut().unwrap().remove("summary");
        assert!(decode_analysis(raw).is_err());

        assert!(decode_analysis(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn rejects_blank_signal() {
        let mut raw = full_report();
        raw["final_decision"]["signal"] = json!("   ");
        assert!(decode_analysis(raw).is_err());
    }

    #[test]
    fn malformed_timestamp_is_dropped() {
        let mut raw = full_report();
        raw["metadata"]["generated_at"] = json!("yesterday");
        let report = decode_analysis(raw).unwrap().report;
        assert_eq!(report.generated_at, None);
    }
}
