use std::fmt;

/// Message shown to the user for every failed analysis call.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch analysis";

/// Any failure of the analysis call. Network errors, non-2xx statuses and
/// undecodable bodies all surface to the user as the same message; the
/// remaining fields only feed logs and error reporting.
#[derive(Debug, Clone)]
pub struct AnalysisError {
    pub stage: &'static str,
    pub status: Option<u16>,
    pub detail: String,
}

impl AnalysisError {
    pub fn new(stage: &'static str, detail: impl Into<String>) -> Self {
        Self {
            stage,
            status: None,
            detail: detail.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "analysis request failed (stage={}, status={status}): {}",
                self.stage, self.detail
            ),
            None => write!(
                f,
                "analysis request failed (stage={}): {}",
                self.stage, self.detail
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}
