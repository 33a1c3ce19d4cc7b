use super::{escape, json_viewer, metric_card, risk_badge};
use crate::controller::{Dashboard, RequestState};
use crate::domain::report::AnalysisResult;
use crate::domain::ticker::Ticker;

pub const TITLE: &str = "Stock Volatility Intelligence";
const TAGLINE: &str = "Probabilistic volatility risk signals powered by regime-aware machine learning and real-time market context.";
const DISCLAIMER: &str = "Signals indicate short-term volatility expansion risk. This is not price prediction or investment advice.";
const IDLE_PROMPT: &str = "Choose a stock to generate an AI-driven volatility risk report.";
const LOADING_LINE: &str = "Evaluating market regimes and contextual signals…";
const LOADING_REFRESH_SECS: u32 = 2;

const STYLES: &str = r#"
  body { margin: 0; min-height: 100vh; font-family: system-ui, sans-serif;
         background: linear-gradient(135deg, #0f172a, #1e293b 50%, #312e81); padding: 2rem; }
  .container { max-width: 72rem; margin: 0 auto; }
  .panel { background: #fff; border-radius: 1.5rem; padding: 3rem; margin-bottom: 3.5rem;
           box-shadow: 0 25px 50px -12px rgba(0,0,0,.25); }
  h1 { font-size: 3rem; margin: 0 0 1rem; color: #111827; }
  .tagline { color: #4b5563; font-size: 1.125rem; max-width: 48rem; }
  .controls { display: flex; gap: 2rem; align-items: flex-end; flex-wrap: wrap; margin: 2.5rem 0; }
  .controls label { display: flex; flex-direction: column; font-size: .875rem; color: #4b5563; width: 18rem; }
  .controls select { margin-top: .5rem; padding: .75rem 1rem; font-size: 1.125rem; border-radius: .75rem; border: 1px solid #d1d5db; }
  .trigger { padding: 1rem 2.5rem; border: 0; border-radius: .75rem; font-size: 1.125rem; font-weight: 600;
             color: #fff; background: #4f46e5; cursor: pointer; }
  .trigger:disabled { background: #9ca3af; cursor: not-allowed; }
  .secondary { padding: .75rem 1.25rem; border-radius: .75rem; border: 1px solid #d1d5db; background: #fff; cursor: pointer; }
  .disclaimer { font-size: .875rem; color: #6b7280; }
  .status { text-align: center; color: #9ca3af; }
  .status.loading { color: #a5b4fc; font-weight: 500; }
  .status.error { color: #f87171; font-weight: 500; }
  .metrics { display: flex; flex-wrap: wrap; gap: 2rem; align-items: center; }
  .metric-card { display: flex; flex-direction: column; background: #f9fafb; border: 1px solid #e5e7eb; border-radius: .5rem; padding: 1rem; }
  .metric-label { font-size: .875rem; color: #6b7280; }
  .metric-value { font-size: 1.125rem; font-weight: 600; color: #111827; }
  .risk-slot { display: flex; flex-direction: column; }
  .risk-badge { padding: .25rem .75rem; border-radius: 9999px; font-size: .875rem; font-weight: 600; border: 1px solid; }
  .risk-low { background: #dcfce7; color: #166534; border-color: #86efac; }
  .risk-medium { background: #fef9c3; color: #854d0e; border-color: #fde047; }
  .risk-high { background: #fee2e2; color: #991b1b; border-color: #fca5a5; }
  .risk-unknown { background: #f3f4f6; color: #374151; border-color: #d1d5db; }
  .summary { white-space: pre-wrap; color: #374151; line-height: 1.625; }
  .generated { font-size: .75rem; color: #9ca3af; }
  details summary { cursor: pointer; font-weight: 600; color: #374151; }
  .json-viewer { font-size: .75rem; background: #111827; color: #bbf7d0; padding: 1rem; border-radius: .5rem;
                 overflow: auto; max-height: 24rem; }
"#;

/// Renders the whole dashboard document for the current controller state.
pub fn page(dash: &Dashboard) -> String {
    let refresh = if dash.is_loading() {
        format!(r#"<meta http-equiv="refresh" content="{LOADING_REFRESH_SECS}" />"#)
    } else {
        String::new()
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
{refresh}
<title>{TITLE}</title>
<style>{STYLES}</style>
</head>
<body>
<main class="container">
{hero}
{status}
{results}
</main>
</body>
</html>
"#,
        hero = hero(dash),
        status = status_line(dash),
        results = results_section(dash),
    )
}

fn hero(dash: &Dashboard) -> String {
    let mut options = String::new();
    for ticker in Ticker::ALL {
        let selected = if ticker == dash.selected() { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            ticker.as_str(),
            escape(ticker.label())
        ));
    }

    let (disabled, label) = if dash.trigger_disabled() {
        (" disabled", "Analyzing…")
    } else {
        ("", "Analyze Volatility")
    };

    format!(
        r#"<section class="panel hero">
<h1>{TITLE}</h1>
<p class="tagline">{TAGLINE}</p>
<form class="controls" method="post" action="/analyze">
<label>Select NSE Stock<select name="ticker">{options}</select></label>
<button type="submit" class="secondary" formaction="/select">Select</button>
<button type="submit" class="trigger"{disabled}>{label}</button>
</form>
<p class="disclaimer">{DISCLAIMER}</p>
</section>"#
    )
}

fn status_line(dash: &Dashboard) -> String {
    match dash.state() {
        RequestState::Idle => format!(r#"<p class="status idle">{IDLE_PROMPT}</p>"#),
        RequestState::Loading { .. } => format!(r#"<p class="status loading">{LOADING_LINE}</p>"#),
        RequestState::Failure { message, .. } => {
            format!(r#"<p class="status error">{}</p>"#, escape(message))
        }
        RequestState::Success { .. } => String::new(),
    }
}

fn results_section(dash: &Dashboard) -> String {
    match dash.state() {
        RequestState::Success { ticker, result } => results(*ticker, result),
        _ => String::new(),
    }
}

fn results(ticker: Ticker, result: &AnalysisResult) -> String {
    let report = &result.report;

    let mut metrics = String::new();
    metrics.push_str(&metric_card("Ticker", ticker.as_str()));
    metrics.push_str(&metric_card("Final Signal", &report.signal));
    metrics.push_str(&metric_card("Confidence", &report.confidence));
    if let Some(score) = report.risk_score {
        metrics.push_str(&metric_card("Risk Score", &score.to_string()));
    }

    if let Some(date) = &report.date {
        metrics.push_str(&metric_card("As Of", date));
    }
    if let Some(news_count) = report.news_count {
        metrics.push_str(&metric_card("News Items", &news_count.to_string()));
    }

    let mut provenance = Vec::new();
    if let Some(dt) = report.generated_at {
        provenance.push(format!("Generated {}", dt.format("%Y-%m-%d %H:%M UTC")));
    }
    if let Some(system) = &report.system {
        provenance.push(format!("by {}", escape(system)));
    }
    let generated = if provenance.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="generated">{}</p>"#, provenance.join(" "))
    };

    format!(
        r#"<section class="panel results">
<div class="metrics">
{metrics}
<div class="risk-slot"><span class="metric-label">Risk Bucket</span>{badge}</div>
</div>
<h2>Model + Context Explanation</h2>
<p class="summary">{summary}</p>
{generated}
<details>
<summary>View full JSON report</summary>
{json}
</details>
</section>"#,
        badge = risk_badge(report.risk_bucket),
        summary = escape(&report.summary),
        json = json_viewer(&result.raw),
    )
}
