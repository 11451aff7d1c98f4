use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level shape of the market groups endpoint.
///
/// Only the fields the store schema needs are modelled. The `markets`
/// array and each entry's `referentiel.stockName` are required; every
/// other field decodes to `None` whether it is absent or JSON `null`,
/// and is defaulted when the row is built.
#[derive(Debug, Deserialize)]
pub struct MarketsPayload {
    pub markets: Vec<MarketEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MarketEntry {
    pub referentiel: Referentiel,
    pub limit: Option<Limit>,
    pub status: Option<String>,
    pub close: Option<f64>,
    pub last: Option<f64>,
    pub change: Option<f64>,
    #[serde(rename = "trVolume")]
    pub tr_volume: Option<i64>,
    pub volume: Option<i64>,
    pub caps: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

/// Identifying block of an entry. `stockName` is the one hard
/// requirement in the whole payload.
#[derive(Debug, Deserialize)]
pub struct Referentiel {
    #[serde(rename = "stockName")]
    pub stock_name: String,
    pub isin: Option<String>,
}

/// Order book summary. A missing or null block behaves as an empty one.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Limit {
    #[serde(rename = "askOrd")]
    pub ask_ord: Option<i64>,
    #[serde(rename = "askQty")]
    pub ask_qty: Option<i64>,
    pub ask: Option<f64>,
    pub bid: Option<f64>,
    #[serde(rename = "bidQty")]
    pub bid_qty: Option<i64>,
    #[serde(rename = "bidOrd")]
    pub bid_ord: Option<i64>,
    pub time: Option<String>,
}

/// Decode the endpoint body into the typed payload.
pub fn decode(body: &str) -> Result<MarketsPayload> {
    serde_json::from_str(body).context("decoding market groups payload")
}
