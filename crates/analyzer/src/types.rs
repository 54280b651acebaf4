// In crates/analyzer/src/types.rs

use serde::{Deserialize, Serialize};

/// Tunable parameters for the setup analyzer.
///
/// Every field carries a serde default so a bare `[scan.setup]` table in the
/// configuration yields the standard 9/20 swing-scan parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SetupSettings {
    /// Window of the short simple moving average, in bars.
    #[serde(default = "default_short_window")]
    pub short_window: u32,
    /// Window of the long simple moving average, in bars.
    #[serde(default = "default_long_window")]
    pub long_window: u32,

    /// How many bars back to look when classifying the long MA's direction.
    #[serde(default = "default_trend_lookback")]
    pub trend_lookback: u32,
    /// Relative band around the past long MA inside which the trend counts
    /// as sideways.
    #[serde(default = "default_trend_tolerance")]
    pub trend_tolerance: f64,

    /// Maximum relative distance between the last close and the long MA for
    /// the price to count as "near" the mean.
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: f64,

    /// Relative offset from the short MA at which the entry is placed.
    #[serde(default = "default_entry_offset")]
    pub entry_offset: f64,
    /// Distance of target and stop from the entry, as a fraction of it.
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: f64,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            trend_lookback: default_trend_lookback(),
            trend_tolerance: default_trend_tolerance(),
            proximity_threshold: default_proximity_threshold(),
            entry_offset: default_entry_offset(),
            risk_per_trade: default_risk_per_trade(),
        }
    }
}

// Helper functions for serde defaults.
fn default_short_window() -> u32 { 9 }
fn default_long_window() -> u32 { 20 }
fn default_trend_lookback() -> u32 { 5 }
fn default_trend_tolerance() -> f64 { 0.002 }
fn default_proximity_threshold() -> f64 { 0.015 }
fn default_entry_offset() -> f64 { 0.01 }
fn default_risk_per_trade() -> f64 { 0.05 }
