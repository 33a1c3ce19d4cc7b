use crate::client::error::AnalysisError;
use crate::client::AnalysisClient;
use crate::domain::report::AnalysisResult;
use crate::domain::ticker::Ticker;

pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to analyze stock";

/// Lifecycle of the single analysis request the dashboard tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        ticker: Ticker,
    },
    Success {
        ticker: Ticker,
        result: AnalysisResult,
    },
    Failure {
        ticker: Ticker,
        message: String,
    },
}

/// Interaction state of the dashboard page. The only mutable state in the
/// system; renderers borrow it.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    selected: Ticker,
    state: RequestState,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Ticker {
        self.selected
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Changes the selection only. An in-flight request keeps its ticker.
    pub fn select_ticker(&mut self, ticker: Ticker) {
        if let RequestState::Loading { ticker: in_flight } = self.state {
            if in_flight != ticker {
                tracing::debug!(%in_flight, selected = %ticker, "selection changed while loading");
            }
        }
        self.selected = ticker;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    pub fn trigger_disabled(&self) -> bool {
        self.is_loading()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            RequestState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failure { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Ticker the current result, error, or pending request belongs to.
    pub fn answered_ticker(&self) -> Option<Ticker> {
        match &self.state {
            RequestState::Idle => None,
            RequestState::Loading { ticker }
            | RequestState::Success { ticker, .. }
            | RequestState::Failure { ticker, .. } => Some(*ticker),
        }
    }

    /// Clears the previous outcome and enters Loading for the selected
    /// ticker. Returns `None` while a request is already in flight.
    pub fn begin_analysis(&mut self) -> Option<Ticker> {
        if self.trigger_disabled() {
            tracing::debug!(selected = %self.selected, "analysis already in flight; trigger ignored");
            return None;
        }
        let ticker = self.selected;
        self.state = RequestState::Loading { ticker };
        tracing::debug!(%ticker, "analysis started");
        Some(ticker)
    }

    pub fn finish_analysis(&mut self, outcome: anyhow::Result<AnalysisResult>) {
        let RequestState::Loading { ticker } = self.state else {
            tracing::warn!("analysis outcome arrived while not loading; ignored");
            return;
        };

        self.state = match outcome {
            Ok(result) => {
                tracing::debug!(%ticker, "analysis succeeded");
                RequestState::Success { ticker, result }
            }
            Err(err) => {
                let message = failure_message(&err);
                tracing::debug!(%ticker, %message, "analysis failed");
                RequestState::Failure { ticker, message }
            }
        };
    }

    /// Runs one full request cycle against `client`. Returns `false` when
    /// the trigger was disabled and nothing was sent.
    pub async fn run_analysis(&mut self, client: &dyn AnalysisClient) -> bool {
        let Some(ticker) = self.begin_analysis() else {
            return false;
        };
        let outcome = client.analyze(ticker).await;
        self.finish_analysis(outcome);
        true
    }
}

fn failure_message(err: &anyhow::Error) -> String {
    if let Some(analysis) = err.downcast_ref::<AnalysisError>() {
        return analysis.user_message().to_string();
    }
    let message = err.to_string();
    if message.trim().is_empty() {
        DEFAULT_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::decode_analysis;
    use serde_json::json;
    use std::sync::Mutex;

    fn sample_result() -> AnalysisResult {
        decode_analysis(json!({
            "model": {"risk_bucket": "high"},
            "final_decision": {"signal": "EXPAND", "confidence": "0.82"},
            "explanation": {"summary": "text"}
        }))
        .unwrap()
    }

    struct ScriptedClient {
        calls: Mutex<Vec<Ticker>>,
        fail: bool,
    }

    impl ScriptedClient {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait::async_trait]
    impl AnalysisClient for ScriptedClient {
        async fn analyze(&self, ticker: Ticker) -> anyhow::Result<AnalysisResult> {
            self.calls.lock().unwrap().push(ticker);
            if self.fail {
                return Err(AnalysisError::new("http", "boom").with_status(500).into());
            }
            Ok(sample_result())
        }
    }

    #[test]
    fn starts_idle_with_default_ticker() {
        let dash = Dashboard::new();
        assert_eq!(dash.selected(), Ticker::Reliance);
        assert_eq!(dash.state(), &RequestState::Idle);
        assert!(!dash.trigger_disabled());
    }

    #[test]
    fn selection_does_not_touch_request_state() {
        let mut dash = Dashboard::new();
        dash.begin_analysis();
        dash.finish_analysis(Ok(sample_result()));
        dash.select_ticker(Ticker::Infy);
        assert_eq!(dash.selected(), Ticker::Infy);
        assert!(dash.result().is_some());
    }

    #[test]
    fn begin_clears_previous_outcome() {
        let mut dash = Dashboard::new();
        dash.begin_analysis();
        dash.finish_analysis(Err(anyhow::anyhow!("down")));
        assert_eq!(dash.error(), Some("down"));

        dash.select_ticker(Ticker::Tcs);
        assert_eq!(dash.begin_analysis(), Some(Ticker::Tcs));
        assert_eq!(dash.error(), None);
        assert!(dash.result().is_none());
        assert!(dash.is_loading());
    }

    #[test]
    fn trigger_is_disabled_while_loading() {
        let mut dash = Dashboard::new();
        assert_eq!(dash.begin_analysis(), Some(Ticker::Reliance));
        assert!(dash.trigger_disabled());
        assert_eq!(dash.begin_analysis(), None);
        assert_eq!(
            dash.state(),
            &RequestState::Loading {
                ticker: Ticker::Reliance
            }
        );
    }

    #[test]
    fn result_keeps_the_ticker_it_answers() {
        let mut dash = Dashboard::new();
        dash.select_ticker(Ticker::HdfcBank);
        dash.begin_analysis();
        dash.select_ticker(Ticker::IciciBank);
        dash.finish_analysis(Ok(sample_result()));

        assert_eq!(dash.selected(), Ticker::IciciBank);
        assert_eq!(dash.answered_ticker(), Some(Ticker::HdfcBank));
    }

    #[test]
    fn failure_messages() {
        let err: anyhow::Error = AnalysisError::new("decode", "bad body").into();
        assert_eq!(failure_message(&err), "Failed to fetch analysis");
        assert_eq!(failure_message(&anyhow::anyhow!("socket closed")), "socket closed");
        assert_eq!(failure_message(&anyhow::anyhow!("")), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn outcome_without_pending_request_is_ignored() {
        let mut dash = Dashboard::new();
        dash.finish_analysis(Ok(sample_result()));
        assert_eq!(dash.state(), &RequestState::Idle);
    }

    #[tokio::test]
    async fn run_analysis_uses_selected_ticker() {
        let client = ScriptedClient::new(false);
        let mut dash = Dashboard::new();

        for ticker in Ticker::ALL {
            dash.select_ticker(ticker);
            assert!(dash.run_analysis(&client).await);
            assert!(dash.result().is_some());
        }

        assert_eq!(client.calls.lock().unwrap().as_slice(), &Ticker::ALL);
    }

    #[tokio::test]
    async fn failed_run_then_successful_retry_clears_error() {
        let failing = ScriptedClient::new(true);
        let mut dash = Dashboard::new();
        dash.run_analysis(&failing).await;
        assert_eq!(dash.error(), Some("Failed to fetch analysis"));
        assert!(dash.result().is_none());

        let working = ScriptedClient::new(false);
        dash.run_analysis(&working).await;
        assert_eq!(dash.error(), None);
        assert_eq!(dash.result().unwrap().report.signal, "EXPAND");
    }
}
