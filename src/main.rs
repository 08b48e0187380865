use anyhow::{Context, Result};

use macro_watch::config::{self, Settings};
use macro_watch::data::fmp::FmpClient;
use macro_watch::pipeline::{self, EvaluateOptions};
use macro_watch::report::text;
use macro_watch::{Resolvers, StaticDirectory};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // logs go to stderr so stdout carries only the report
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env();
    init_tracing();

    let settings = Settings::from_env().context("Invalid configuration")?;
    let now = chrono::Local::now().naive_local();

    let calendar = settings
        .load_calendar(now.date())
        .context("Failed to load macro calendar")?;

    let resolvers = match &settings.fmp_api_key {
        Some(key) => Resolvers::from_provider(FmpClient::new(
            key.clone(),
            now.date(),
            settings.resolver_timeout,
        )?),
        None => {
            tracing::warn!("FMP_API_KEY not set; sector and earnings data will be unavailable");
            Resolvers::from_provider(StaticDirectory::new())
        }
    };

    let options = EvaluateOptions {
        tone: settings.tone,
        resolver_timeout: settings.resolver_timeout,
    };
    let report = pipeline::evaluate(&settings.watchlist, &calendar, &resolvers, now, options).await?;

    print!("{}", text::render(&report));
    Ok(())
}
