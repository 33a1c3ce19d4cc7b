use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use volscope_core::client::AnalysisClient;
use volscope_core::controller::Dashboard;
use volscope_core::domain::ticker::Ticker;
use volscope_core::render;

#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    client: Arc<dyn AnalysisClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(Dashboard::new())),
            client,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/select", post(select))
        .route("/analyze", post(analyze))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct TickerForm {
    #[serde(default)]
    ticker: Option<String>,
}

fn parse_ticker(raw: &str) -> Result<Ticker, StatusCode> {
    raw.parse::<Ticker>().map_err(|e| {
        tracing::warn!(error = %e, "rejected ticker selection");
        StatusCode::BAD_REQUEST
    })
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let dash = state.dashboard.lock().await;
    Html(render::page(&dash))
}

async fn select(
    State(state): State<AppState>,
    Form(form): Form<TickerForm>,
) -> Result<Redirect, StatusCode> {
    let raw = form.ticker.ok_or(StatusCode::BAD_REQUEST)?;
    let ticker = parse_ticker(&raw)?;
    state.dashboard.lock().await.select_ticker(ticker);
    Ok(Redirect::to("/"))
}

async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<TickerForm>,
) -> Result<Response, StatusCode> {
    let ticker = {
        let mut dash = state.dashboard.lock().await;
        if let Some(raw) = form.ticker.as_deref() {
            dash.select_ticker(parse_ticker(raw)?);
        }
        match dash.begin_analysis() {
            Some(ticker) => ticker,
            None => return Ok((StatusCode::CONFLICT, Html(render::page(&dash))).into_response()),
        }
    };

    // The call runs detached: the browser gets the Loading page at once and
    // polls through its auto-refresh until the outcome is stored.
    tokio::spawn(run_analysis(state, ticker));

    Ok(Redirect::to("/").into_response())
}

async fn run_analysis(state: AppState, ticker: Ticker) {
    let client = state.client.clone();
    let call = tokio::spawn(async move { client.analyze(ticker).await });

    let outcome = match call.await {
        Ok(outcome) => outcome,
        Err(join_err) => {
            tracing::error!(%ticker, error = %join_err, "analysis task aborted");
            Err(anyhow::anyhow!("analysis task aborted"))
        }
    };
    if let Err(err) = &outcome {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(%ticker, error = %err, "analysis failed");
    }
    state.dashboard.lock().await.finish_analysis(outcome);
}
