// In crates/api-client/src/lib.rs

use app_config::types::ProviderSettings;
use async_trait::async_trait;
use chrono::DateTime;
use core_types::{PriceBar, Symbol};
use serde_json::Value;

pub mod demo;
pub mod error;
pub mod types;

// Re-export public types
pub use demo::DemoDataSource;
pub use error::{Error, Result};
pub use types::*;

/// The seam between the scanner and whatever supplies daily bars.
///
/// Implemented by the live REST client and by the demo generator; the
/// scanner only ever sees this trait.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Returns one ticker's chronological daily bars, most recent last.
    async fn daily_bars(&self, symbol: &Symbol) -> Result<Vec<PriceBar>>;
}

impl ApiClient {
    /// Constructs a new ApiClient from ProviderSettings.
    pub fn new(settings: &ProviderSettings) -> Self {
        ApiClient {
            http_client: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            api_token: settings.api_token.clone(),
            range: settings.range.clone(),
        }
    }

    /// Fetches the trailing daily bar history for one ticker.
    ///
    /// This corresponds to the provider's `GET /api/quote/{ticker}` endpoint
    /// with `interval=1d`.
    pub async fn get_daily_bars(&self, symbol: &Symbol) -> Result<Vec<PriceBar>> {
        let mut url = format!(
            "{}/api/quote/{}?range={}&interval=1d",
            self.base_url, symbol.0, self.range
        );
        if let Some(token) = &self.api_token {
            url.push_str(&format!("&token={}", token));
        }

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;

        // The provider returns an error object with a message on failure.
        if !status.is_success() {
            let msg = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Unknown provider error".to_string());
            return Err(Error::ApiError {
                status: status.as_u16(),
                msg,
            });
        }

        let quote: QuoteResponse =
            serde_json::from_str(&text).map_err(Error::DeserializationFailed)?;

        let result = quote
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyHistory(symbol.0.clone()))?;

        let bars = bars_from_raw(result.historical_data_price);
        if bars.is_empty() {
            return Err(Error::EmptyHistory(symbol.0.clone()));
        }

        Ok(bars)
    }
}

#[async_trait]
impl MarketData for ApiClient {
    async fn daily_bars(&self, symbol: &Symbol) -> Result<Vec<PriceBar>> {
        self.get_daily_bars(symbol).await
    }
}

/// Converts the provider's raw rows into our clean, internal `PriceBar`
/// type: null-priced rows are dropped and the remainder sorted
/// chronologically.
fn bars_from_raw(raw: Vec<RawDailyBar>) -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = raw
        .into_iter()
        .filter_map(|row| {
            let date = DateTime::from_timestamp(row.date, 0)?;
            Some(PriceBar {
                date,
                open: row.open?,
                high: row.high?,
                low: row.low?,
                close: row.close?,
                volume: row.volume.unwrap_or(0),
            })
        })
        .collect();
    bars.sort_by_key(|bar| bar.date);
    bars
}
