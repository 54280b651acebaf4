// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// The REST client for the quote provider.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL of the provider (e.g. "https://brapi.dev").
    pub base_url: String,
    /// Optional API token, appended to every request when present.
    pub api_token: Option<String>,
    /// The trailing history window to request (e.g. "3mo").
    pub range: String,
}

/// Top-level shape of the provider's quote endpoint response.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub results: Vec<QuoteResult>,
}

/// One ticker's block inside a quote response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub symbol: String,
    /// Daily bars, oldest first is NOT guaranteed by the provider.
    #[serde(default)]
    pub historical_data_price: Vec<RawDailyBar>,
}

/// A single daily bar as the provider serializes it. Price fields are
/// nullable; the provider emits null rows for days without trades.
#[derive(Debug, Deserialize)]
pub struct RawDailyBar {
    /// Unix timestamp in seconds.
    pub date: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}
