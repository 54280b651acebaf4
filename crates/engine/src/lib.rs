// In crates/engine/src/lib.rs

pub mod error;

use analyzer::SetupAnalyzer;
use api_client::MarketData;
use chrono::Utc;
use core_types::{AnalysisResult, Symbol};
use std::sync::Arc;

pub use error::{Error, Result};

/// The batch runner: walks the configured ticker list, fetches each
/// ticker's history and hands it to the analyzer.
///
/// Tickers are processed strictly sequentially; the pipeline holds no state
/// between requests, so every scan fetches fresh data. One ticker's failure
/// never aborts the batch: the failed ticker is reported with an
/// `Error`-trend placeholder instead.
pub struct Scanner {
    data: Arc<dyn MarketData>,
    analyzer: SetupAnalyzer,
    tickers: Vec<Symbol>,
}

impl Scanner {
    pub fn new(data: Arc<dyn MarketData>, analyzer: SetupAnalyzer, tickers: Vec<Symbol>) -> Self {
        Self {
            data,
            analyzer,
            tickers,
        }
    }

    /// The tickers this scanner covers, in response order.
    pub fn tickers(&self) -> &[Symbol] {
        &self.tickers
    }

    /// Scans every configured ticker. The output always has exactly one
    /// entry per ticker, in configuration order.
    pub async fn scan(&self) -> Vec<AnalysisResult> {
        let mut results = Vec::with_capacity(self.tickers.len());
        for ticker in &self.tickers {
            results.push(self.analyze_ticker(ticker).await);
        }
        results
    }

    /// Scans a single configured ticker. Unlike `scan`, provider failures
    /// surface to the caller instead of being masked by a placeholder.
    pub async fn scan_one(&self, ticker: &Symbol) -> Result<AnalysisResult> {
        if !self.tickers.contains(ticker) {
            return Err(Error::UnknownTicker(ticker.0.clone()));
        }

        let bars = self.data.daily_bars(ticker).await?;
        match self.analyzer.analyze(ticker, &bars) {
            Ok(result) => Ok(result),
            Err(analyzer::Error::InsufficientData { required, got }) => {
                tracing::warn!(%ticker, required, got, "not enough history, reporting undefined");
                Ok(AnalysisResult::undefined_placeholder(ticker.clone(), Utc::now()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn analyze_ticker(&self, ticker: &Symbol) -> AnalysisResult {
        let bars = match self.data.daily_bars(ticker).await {
            Ok(bars) => bars,
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "market data fetch failed");
                return AnalysisResult::error_placeholder(ticker.clone(), Utc::now());
            }
        };

        match self.analyzer.analyze(ticker, &bars) {
            Ok(result) => result,
            Err(analyzer::Error::InsufficientData { required, got }) => {
                tracing::warn!(%ticker, required, got, "not enough history, reporting undefined");
                AnalysisResult::undefined_placeholder(ticker.clone(), Utc::now())
            }
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "analysis failed");
                AnalysisResult::error_placeholder(ticker.clone(), Utc::now())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::SetupSettings;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use core_types::{PriceBar, Trend};
    use std::collections::HashMap;

    /// Stub data source: a fixed close series per ticker, anything else
    /// fails the fetch.
    struct ScriptedData {
        series: HashMap<Symbol, Vec<f64>>,
    }

    #[async_trait]
    impl MarketData for ScriptedData {
        async fn daily_bars(&self, symbol: &Symbol) -> api_client::Result<Vec<PriceBar>> {
            let closes = self
                .series
                .get(symbol)
                .ok_or_else(|| api_client::Error::EmptyHistory(symbol.0.clone()))?;

            let start = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
            Ok(closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1_000,
                })
                .collect())
        }
    }

    fn scanner(series: HashMap<Symbol, Vec<f64>>, tickers: &[&str]) -> Scanner {
        Scanner::new(
            Arc::new(ScriptedData { series }),
            SetupAnalyzer::new(SetupSettings::default()).unwrap(),
            tickers.iter().map(|t| Symbol(t.to_string())).collect(),
        )
    }

    #[tokio::test]
    async fn one_failed_fetch_does_not_abort_the_batch() {
        let mut series = HashMap::new();
        series.insert(Symbol("PETR4".into()), vec![100.0; 25]);
        // VALE3 intentionally missing: its fetch fails.
        series.insert(Symbol("ITUB4".into()), vec![30.0; 25]);

        let scanner = scanner(series, &["PETR4", "VALE3", "ITUB4"]);
        let results = scanner.scan().await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].ticker.0, "PETR4");
        assert_eq!(results[0].trend, Trend::Sideways);
        assert_eq!(results[0].long_ma, Some(100.0));

        assert_eq!(results[1].ticker.0, "VALE3");
        assert_eq!(results[1].trend, Trend::Error);
        assert_eq!(results[1].current_price, None);
        assert!(!results[1].is_setup_candidate);

        assert_eq!(results[2].ticker.0, "ITUB4");
        assert_eq!(results[2].trend, Trend::Sideways);
    }

    #[tokio::test]
    async fn short_history_is_reported_as_undefined() {
        let mut series = HashMap::new();
        series.insert(Symbol("MGLU3".into()), vec![3.0; 10]);

        let scanner = scanner(series, &["MGLU3"]);
        let results = scanner.scan().await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].trend, Trend::Undefined);
        assert_eq!(results[0].long_ma, None);
    }

    #[tokio::test]
    async fn scan_one_rejects_unconfigured_tickers() {
        let scanner = scanner(HashMap::new(), &["PETR4"]);
        let err = scanner
            .scan_one(&Symbol("AAPL".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTicker(_)));
    }

    #[tokio::test]
    async fn scan_one_propagates_fetch_errors() {
        let scanner = scanner(HashMap::new(), &["PETR4"]);
        let err = scanner
            .scan_one(&Symbol("PETR4".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
