use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

/// Fetch the raw market snapshot body from the exchange endpoint.
///
/// Connection errors and non-success statuses both surface here as the
/// transport failure class; the caller decides whether the run halts.
pub async fn fetch_body(client: &Client, url: &Url) -> Result<String> {
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("non-success status from {}", url))?
        .text()
        .await
        .with_context(|| format!("reading body from {}", url))
}
