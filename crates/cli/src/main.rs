use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volscope_core::client::http::HttpAnalysisClient;
use volscope_core::controller::{Dashboard, RequestState};
use volscope_core::domain::ticker::Ticker;
use volscope_core::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Terminal report.
    Text,
    /// The full dashboard page.
    Html,
    /// Raw payload returned by the analysis service.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "volscope_cli")]
struct Args {
    /// Symbol to analyze (case-sensitive, see --list).
    #[arg(long, default_value_t = Ticker::default().as_str().to_string())]
    ticker: String,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Append the raw JSON report to text output.
    #[arg(long)]
    raw: bool,

    /// Print the supported tickers and exit.
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = volscope_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if args.list {
        for ticker in Ticker::ALL {
            println!("{:<10} {}", ticker.as_str(), ticker.label());
        }
        return Ok(());
    }

    let ticker: Ticker = args.ticker.parse()?;
    let client = HttpAnalysisClient::from_settings(&settings)?;

    let mut dashboard = Dashboard::new();
    dashboard.select_ticker(ticker);
    dashboard.run_analysis(&client).await;

    if args.format == Format::Html {
        print!("{}", render::page(&dashboard));
    }

    match dashboard.state() {
        RequestState::Success { ticker, result } => {
            match args.format {
                Format::Text => {
                    let color = std::io::stdout().is_terminal();
                    print!("{}", render::text::report(*ticker, result, color, args.raw));
                }
                Format::Json => println!("{}", render::format_json(&result.raw)),
                Format::Html => {}
            }
            tracing::info!(%ticker, "analysis complete");
            Ok(())
        }
        RequestState::Failure { ticker, message } => {
            let err = anyhow::anyhow!("{message} (ticker={ticker})");
            sentry_anyhow::capture_anyhow(&err);
            Err(err)
        }
        RequestState::Idle | RequestState::Loading { .. } => {
            anyhow::bail!("analysis did not complete")
        }
    }
}

fn init_sentry(settings: &volscope_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
