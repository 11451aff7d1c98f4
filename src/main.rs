use anyhow::Result;
use bvmtscraper::pipeline::{self, ScraperConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure client + run one scrape cycle ──────────────────
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    let config = ScraperConfig::default();

    let appended = pipeline::run_once(&client, &config).await?;
    info!(rows = appended, store = %config.store_path.display(), "run complete");
    Ok(())
}
