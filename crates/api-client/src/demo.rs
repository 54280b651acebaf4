// In crates/api-client/src/demo.rs

use crate::{MarketData, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use core_types::{PriceBar, Symbol};
use rand::Rng;

/// Offline data source that fabricates a plausible daily history per
/// ticker, so the scanner can run without network access or a provider
/// token. Each ticker gets a random-walk series with its own drift, which
/// keeps a share of the demo universe trending and a share near its mean.
#[derive(Debug, Clone)]
pub struct DemoDataSource {
    bars: usize,
}

impl DemoDataSource {
    pub fn new(bars: usize) -> Self {
        Self { bars }
    }
}

#[async_trait]
impl MarketData for DemoDataSource {
    async fn daily_bars(&self, symbol: &Symbol) -> Result<Vec<PriceBar>> {
        tracing::debug!(%symbol, bars = self.bars, "generating demo history");

        let mut rng = rand::rng();
        let mut close: f64 = rng.random_range(15.0..50.0);
        let drift = rng.random_range(-0.005..0.006);
        let start = Utc::now() - Duration::days(self.bars as i64);

        let bars = (0..self.bars)
            .map(|i| {
                let open = close;
                let daily_return = drift + rng.random_range(-0.012..0.012);
                close = (open * (1.0 + daily_return)).max(1.0);
                let high = open.max(close) * (1.0 + rng.random_range(0.0..0.008));
                let low = open.min(close) * (1.0 - rng.random_range(0.0..0.008));
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open,
                    high,
                    low,
                    close,
                    volume: rng.random_range(1_000_000..40_000_000),
                }
            })
            .collect();

        Ok(bars)
    }
}
