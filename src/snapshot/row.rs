use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use super::payload::MarketEntry;

/// Store column captions, written once when the store file is created.
/// These are the exchange's own French captions; they stay byte-stable
/// so stores written by earlier runs keep lining up.
pub const HEADERS: [&str; 19] = [
    "Time",
    "Valeur",
    "ISIN",
    "Statut",
    "Ord.A",
    "Qté.A",
    "Achat",
    "Vente",
    "Qté.V",
    "Ord.V",
    "Cours de référence",
    "Dernier",
    "Var %",
    "Dern Qté",
    "Qté",
    "Capit",
    "P.Haut",
    "P.Bas",
    "Heure",
];

/// One instrument observation, declared in store column order.
///
/// Field order is the record layout of the persistent store; the CSV
/// writer serializes straight from it.
#[derive(Debug, Clone, Serialize)]
pub struct MarketRow {
    #[serde(serialize_with = "serialize_capture_time")]
    pub time: DateTime<Local>,
    pub instrument: String,
    pub isin: String,
    pub status: String,
    pub ask_orders: i64,
    pub ask_qty: i64,
    pub ask: f64,
    pub bid: f64,
    pub bid_qty: i64,
    pub bid_orders: i64,
    pub reference_close: f64,
    pub last: f64,
    pub change_pct: f64,
    pub last_qty: i64,
    pub cumulative_qty: i64,
    pub market_cap: f64,
    pub high: f64,
    pub low: f64,
    pub quote_time: String,
}

fn serialize_capture_time<S>(t: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&t.format("%Y-%m-%d %H:%M:%S%.6f").to_string())
}

impl MarketRow {
    /// Build one row from a decoded entry, capturing the wall clock at
    /// construction and substituting defaults for everything the
    /// payload left out.
    pub fn from_entry(entry: &MarketEntry) -> Self {
        let limit = entry.limit.clone().unwrap_or_default();
        MarketRow {
            time: Local::now(),
            instrument: entry.referentiel.stock_name.clone(),
            isin: entry.referentiel.isin.clone().unwrap_or_default(),
            status: entry.status.clone().unwrap_or_default(),
            ask_orders: limit.ask_ord.unwrap_or(0),
            ask_qty: limit.ask_qty.unwrap_or(0),
            ask: limit.ask.unwrap_or(0.0),
            bid: limit.bid.unwrap_or(0.0),
            bid_qty: limit.bid_qty.unwrap_or(0),
            bid_orders: limit.bid_ord.unwrap_or(0),
            reference_close: entry.close.unwrap_or(0.0),
            last: entry.last.unwrap_or(0.0),
            change_pct: entry.change.unwrap_or(0.0),
            last_qty: entry.tr_volume.unwrap_or(0),
            cumulative_qty: entry.volume.unwrap_or(0),
            market_cap: entry.caps.unwrap_or(0.0),
            high: entry.high.unwrap_or(0.0),
            low: entry.low.unwrap_or(0.0),
            quote_time: limit.time.unwrap_or_default(),
        }
    }
}
