pub mod error;
pub mod http;

use crate::domain::report::AnalysisResult;
use crate::domain::ticker::Ticker;

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Issues exactly one analysis request for `ticker`.
    async fn analyze(&self, ticker: Ticker) -> anyhow::Result<AnalysisResult>;
}
