// In crates/analyzer/src/setup.rs

use crate::types::SetupSettings;
use crate::{Error, Result};
use chrono::Utc;
use core_types::{AnalysisResult, PriceBar, Symbol, Trend};
use ta::indicators::SimpleMovingAverage as Sma;
use ta::Next;

/// The moving-average proximity analyzer.
///
/// Given one ticker's chronological daily bars it computes the short and
/// long simple moving averages of the close, classifies the long MA's
/// direction, and flags the ticker as a setup candidate when price sits
/// near a directional long MA. Candidates additionally get entry, target
/// and stop levels derived from the short MA.
#[derive(Debug, Clone)]
pub struct SetupAnalyzer {
    /// The configuration for this analyzer instance.
    settings: SetupSettings,
}

impl SetupAnalyzer {
    /// Creates a new `SetupAnalyzer`, validating the window configuration.
    pub fn new(settings: SetupSettings) -> Result<Self> {
        if settings.short_window == 0 || settings.long_window == 0 {
            return Err(Error::InvalidSettings(
                "moving average windows must be greater than zero".into(),
            ));
        }
        if settings.short_window >= settings.long_window {
            return Err(Error::InvalidSettings(format!(
                "short window ({}) must be smaller than long window ({})",
                settings.short_window, settings.long_window
            )));
        }
        Ok(Self { settings })
    }

    /// Analyzes one ticker's bar history.
    ///
    /// Fails with `Error::InsufficientData` when fewer than `long_window`
    /// bars are supplied; never panics on short input.
    pub fn analyze(&self, ticker: &Symbol, bars: &[PriceBar]) -> Result<AnalysisResult> {
        let short_window = self.settings.short_window as usize;
        let long_window = self.settings.long_window as usize;
        let lookback = self.settings.trend_lookback as usize;

        if bars.len() < long_window {
            return Err(Error::InsufficientData {
                required: long_window,
                got: bars.len(),
            });
        }

        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        // `closes` is non-empty here: long_window is validated non-zero.
        let current_close = closes[closes.len() - 1];

        let short_series = sma_series(&closes, short_window)?;
        let long_series = sma_series(&closes, long_window)?;
        let short_ma = short_series[short_series.len() - 1];
        let long_ma = long_series[long_series.len() - 1];

        // 1. Trend: compare the long MA against its value `lookback` bars
        //    earlier. The offset is positional, not calendar-based.
        let trend = if closes.len() >= long_window + lookback {
            let past_long_ma = long_series[long_series.len() - 1 - lookback];
            if long_ma > past_long_ma * (1.0 + self.settings.trend_tolerance) {
                Trend::Up
            } else if long_ma < past_long_ma * (1.0 - self.settings.trend_tolerance) {
                Trend::Down
            } else {
                Trend::Sideways
            }
        } else {
            Trend::Undefined
        };

        // 2. Proximity: is the last close near the long MA?
        let relative_distance = (current_close - long_ma).abs() / long_ma;
        let is_close = relative_distance <= self.settings.proximity_threshold;

        // 3. A candidate needs both proximity and a directional trend.
        let is_setup_candidate = is_close && matches!(trend, Trend::Up | Trend::Down);

        // 4. Levels are only meaningful for candidates.
        let (entry_price, target_price, stop_loss_price) = if is_setup_candidate {
            let levels = self.derive_levels(short_ma, trend);
            (Some(levels.0), Some(levels.1), Some(levels.2))
        } else {
            (None, None, None)
        };

        Ok(AnalysisResult {
            ticker: ticker.clone(),
            current_price: Some(round2(current_close)),
            short_ma: Some(round2(short_ma)),
            long_ma: Some(round2(long_ma)),
            trend,
            is_setup_candidate,
            analysis_time: Utc::now(),
            entry_price,
            target_price,
            stop_loss_price,
        })
    }

    /// Derives (entry, target, stop) from the short MA for a directional
    /// trend. Target and stop sit `risk_per_trade` away from the entry, on
    /// opposite sides depending on direction.
    fn derive_levels(&self, short_ma: f64, trend: Trend) -> (f64, f64, f64) {
        let entry = match trend {
            Trend::Up => round2(short_ma * (1.0 + self.settings.entry_offset)),
            _ => round2(short_ma * (1.0 - self.settings.entry_offset)),
        };
        let risk_distance = entry * self.settings.risk_per_trade;
        match trend {
            Trend::Up => (entry, round2(entry + risk_distance), round2(entry - risk_distance)),
            _ => (entry, round2(entry - risk_distance), round2(entry + risk_distance)),
        }
    }
}

/// Streams `values` through a simple moving average of the given window,
/// returning one output per input. Outputs before the window has filled are
/// partial means; callers only read indexes at or past `window - 1`.
fn sma_series(values: &[f64], window: usize) -> Result<Vec<f64>> {
    let mut sma = Sma::new(window)
        .map_err(|_| Error::InvalidSettings(format!("invalid SMA window: {window}")))?;
    Ok(values.iter().map(|value| sma.next(*value)).collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        let start = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + Duration::days(i as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_000_000,
            })
            .collect()
    }

    fn analyzer() -> SetupAnalyzer {
        SetupAnalyzer::new(SetupSettings::default()).unwrap()
    }

    fn symbol() -> Symbol {
        Symbol("PETR4".into())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn rejects_fewer_than_long_window_bars() {
        let bars = bars_from_closes(&vec![10.0; 19]);
        let err = analyzer().analyze(&symbol(), &bars).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData { required: 20, got: 19 }
        ));
    }

    #[test]
    fn exactly_twenty_bars_yields_plain_means() {
        // Closes 1.0..=20.0: the long MA is the mean of all twenty closes,
        // the short MA the mean of the last nine.
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let result = analyzer().analyze(&symbol(), &bars_from_closes(&closes)).unwrap();

        assert_close(result.long_ma.unwrap(), 10.5);
        assert_close(result.short_ma.unwrap(), 16.0);
        // Twenty bars cannot support the 5-bar trend comparison.
        assert_eq!(result.trend, Trend::Undefined);
        assert!(!result.is_setup_candidate);
        assert_eq!(result.entry_price, None);
    }

    #[test]
    fn flat_series_is_sideways_and_never_a_candidate() {
        let bars = bars_from_closes(&vec![100.0; 25]);
        let result = analyzer().analyze(&symbol(), &bars).unwrap();

        // Price sits exactly on the long MA, but a sideways trend vetoes
        // the setup.
        assert_eq!(result.trend, Trend::Sideways);
        assert_close(result.long_ma.unwrap(), 100.0);
        assert_close(result.current_price.unwrap(), 100.0);
        assert!(!result.is_setup_candidate);
        assert_eq!(result.target_price, None);
        assert_eq!(result.stop_loss_price, None);
    }

    #[test]
    fn steep_linear_rise_classifies_as_up() {
        // 25 closes rising from 10.00 in steps of 0.50. The current long MA
        // (17.25) clears the 5-bars-ago long MA (14.75) by far more than the
        // 0.2% tolerance, but price has run away from the mean, so the
        // ticker is trending without being a candidate.
        let closes: Vec<f64> = (0..25).map(|i| 10.0 + 0.5 * i as f64).collect();
        let result = analyzer().analyze(&symbol(), &bars_from_closes(&closes)).unwrap();

        assert_eq!(result.trend, Trend::Up);
        assert_close(result.long_ma.unwrap(), 17.25);
        assert!(!result.is_setup_candidate);
    }

    #[test]
    fn gentle_uptrend_near_mean_produces_long_levels() {
        // A 0.1-per-bar climb keeps the last close within 1.5% of the long
        // MA while the trend comparison still clears the tolerance band.
        let closes: Vec<f64> = (0..29).map(|i| 100.0 + 0.1 * i as f64).collect();
        let result = analyzer().analyze(&symbol(), &bars_from_closes(&closes)).unwrap();

        assert_eq!(result.trend, Trend::Up);
        assert!(result.is_setup_candidate);

        // short MA = 102.40, entry = round(102.40 * 1.01) = 103.42,
        // target/stop = entry ± 5% of entry.
        assert_close(result.short_ma.unwrap(), 102.40);
        assert_close(result.entry_price.unwrap(), 103.42);
        assert_close(result.target_price.unwrap(), 108.59);
        assert_close(result.stop_loss_price.unwrap(), 98.25);
    }

    #[test]
    fn gentle_downtrend_near_mean_produces_short_levels() {
        let closes: Vec<f64> = (0..29).map(|i| 110.0 - 0.1 * i as f64).collect();
        let result = analyzer().analyze(&symbol(), &bars_from_closes(&closes)).unwrap();

        assert_eq!(result.trend, Trend::Down);
        assert!(result.is_setup_candidate);

        // short MA = 107.60, entry = round(107.60 * 0.99) = 106.52; target
        // below the entry, stop above it.
        assert_close(result.short_ma.unwrap(), 107.60);
        assert_close(result.entry_price.unwrap(), 106.52);
        assert_close(result.target_price.unwrap(), 101.19);
        assert_close(result.stop_loss_price.unwrap(), 111.85);
    }

    #[test]
    fn rejects_degenerate_window_configuration() {
        let mut settings = SetupSettings::default();
        settings.short_window = 20;
        assert!(matches!(
            SetupAnalyzer::new(settings),
            Err(Error::InvalidSettings(_))
        ));
    }
}
