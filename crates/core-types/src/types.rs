// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticker symbol as the market-data provider knows it (e.g. "PETR4").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One trading day's aggregated OHLCV data.
///
/// Sequences of bars are always chronological, most recent last, and are
/// treated as immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// The direction of the long moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Sideways,
    /// Not enough history to classify the trend.
    Undefined,
    /// The ticker could not be analyzed at all (fetch or compute failure).
    Error,
}

/// The outcome of analyzing one ticker.
///
/// Built fresh per request and discarded after serialization. Price fields
/// are `None` (JSON `null`) on the placeholder variants, and the three level
/// fields are populated only for setup candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: Symbol,
    pub current_price: Option<f64>,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub trend: Trend,
    pub is_setup_candidate: bool,
    pub analysis_time: DateTime<Utc>,
    pub entry_price: Option<f64>,
    pub target_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
}

impl AnalysisResult {
    /// Placeholder for a ticker whose data could not be fetched or analyzed.
    pub fn error_placeholder(ticker: Symbol, analysis_time: DateTime<Utc>) -> Self {
        Self::placeholder(ticker, Trend::Error, analysis_time)
    }

    /// Placeholder for a ticker with too little history for a defined result.
    pub fn undefined_placeholder(ticker: Symbol, analysis_time: DateTime<Utc>) -> Self {
        Self::placeholder(ticker, Trend::Undefined, analysis_time)
    }

    fn placeholder(ticker: Symbol, trend: Trend, analysis_time: DateTime<Utc>) -> Self {
        Self {
            ticker,
            current_price: None,
            short_ma: None,
            long_ma: None,
            trend,
            is_setup_candidate: false,
            analysis_time,
            entry_price: None,
            target_price: None,
            stop_loss_price: None,
        }
    }
}
