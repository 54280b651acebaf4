// In crates/app-config/src/types.rs

use analyzer::SetupSettings;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the market-data provider.
    pub provider: ProviderSettings,
    /// Settings for the HTTP server.
    pub server: ServerSettings,
    /// What to scan and with which parameters.
    #[serde(default)]
    pub scan: ScanSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

/// Which `MarketData` implementation the binary wires up.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Real quotes over the provider's REST API.
    Live,
    /// Fabricated random-walk history; no network needed.
    Demo,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderSettings {
    pub mode: ProviderMode,
    /// The REST base URL of the quote provider.
    pub base_url: String,
    /// Optional token for authenticated provider plans.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Trailing history window requested per ticker (provider syntax).
    #[serde(default = "default_range")]
    pub range: String,
    /// How many bars the demo source fabricates per ticker.
    #[serde(default = "default_demo_bars")]
    pub demo_bars: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScanSettings {
    /// The tickers scanned on every request, in response order.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,
    /// Parameters of the setup analyzer.
    #[serde(default)]
    pub setup: SetupSettings,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            setup: SetupSettings::default(),
        }
    }
}

// Helper functions for serde defaults.
fn default_range() -> String {
    "3mo".to_string()
}

fn default_demo_bars() -> usize {
    60
}

fn default_tickers() -> Vec<String> {
    ["PETR4", "VALE3", "ITUB4", "BBDC4", "MGLU3", "WEGE3", "PRIO3", "RENT3"]
        .into_iter()
        .map(String::from)
        .collect()
}
