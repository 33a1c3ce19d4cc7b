use crate::client::error::AnalysisError;
use crate::client::AnalysisClient;
use crate::config::Settings;
use crate::domain::report::{decode_analysis, AnalysisResult};
use crate::domain::ticker::Ticker;
use anyhow::Context;
use std::time::Duration;

const ANALYZE_PATH: &str = "/analyze";
const BODY_EXCERPT_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(&settings.analysis_base_url, settings.analysis_timeout)
    }

    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build analysis http client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }

    async fn fetch(&self, ticker: Ticker) -> Result<AnalysisResult, AnalysisError> {
        let res = self
            .http
            .get(self.url())
            .query(&[("ticker", ticker.as_str())])
            .send()
            .await
            .map_err(|e| AnalysisError::new("send", e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AnalysisError::new("body", e.to_string()).with_status(status.as_u16()))?;

        if !status.is_success() {
            return Err(AnalysisError::new("http", excerpt(&text)).with_status(status.as_u16()));
        }

        let raw = serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
            AnalysisError::new("decode", format!("body is not valid JSON ({e}): {}", excerpt(&text)))
        })?;

        decode_analysis(raw).map_err(|e| AnalysisError::new("decode", format!("{e:#}")))
    }
}

#[async_trait::async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, ticker: Ticker) -> anyhow::Result<AnalysisResult> {
        tracing::info!(%ticker, url = %self.url(), "requesting analysis");
        match self.fetch(ticker).await {
            Ok(result) => {
                tracing::info!(
                    %ticker,
                    signal = %result.report.signal,
                    risk_bucket = %result.report.risk_bucket,
                    "analysis received"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(
                    %ticker,
                    stage = err.stage,
                    status = ?err.status,
                    detail = %err.detail,
                    "analysis request failed"
                );
                Err(err.into())
            }
        }
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
    out.push('…');
    out
}
