use anyhow::{Context, Result};
use chrono::Local;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{error, info};
use url::Url;

use crate::{
    fetch,
    snapshot::{payload, row::MarketRow},
    store::SnapshotStore,
};

/// BVMT market groups feed covering the listed equity groups.
pub static MARKET_GROUPS_URL: &str =
    "https://www.bvmt.com.tn/rest_api/rest/market/groups/11,12,52,95,99";

static STORE_FILE: &str = "market_data.csv";

/// Endpoint and store location for one scraper run.
///
/// Defaults point at the exchange feed and the store file the scraper
/// has always written; tests substitute both.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub endpoint: Url,
    pub store_path: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(MARKET_GROUPS_URL).expect("market groups URL should be valid"),
            store_path: PathBuf::from(STORE_FILE),
        }
    }
}

/// Run one fetch → decode → map → append cycle and return the number
/// of rows appended.
///
/// Transport failures are reported and end the run with nothing
/// written; decode failures and store I/O errors propagate.
pub async fn run_once(client: &Client, config: &ScraperConfig) -> Result<usize> {
    let store = SnapshotStore::new(&config.store_path);
    store.ensure_header()?;

    let body = match fetch::fetch_body(client, &config.endpoint).await {
        Ok(body) => body,
        Err(e) => {
            error!("fetch failed, no rows written: {:#}", e);
            return Ok(0);
        }
    };

    let payload = payload::decode(&body)?;
    let rows: Vec<MarketRow> = payload.markets.iter().map(MarketRow::from_entry).collect();
    store
        .append(&rows)
        .with_context(|| format!("appending to {}", config.store_path.display()))?;

    info!(rows = rows.len(), at = %Local::now(), "snapshot appended");
    Ok(rows.len())
}
