// In app/src/main.rs

use analyzer::SetupAnalyzer;
use anyhow::Result;
use api_client::{ApiClient, DemoDataSource, MarketData};
use app_config::ProviderMode;
use clap::{Parser, Subcommand};
use core_types::Symbol;
use engine::Scanner;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A moving-average setup scanner for B3 tickers.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the HTTP server exposing the scan endpoints.
    Serve,

    /// Runs one scan and prints the results as pretty JSON.
    Scan {
        /// Restrict the scan to a single configured ticker (e.g. "PETR4").
        #[arg(short, long)]
        ticker: Option<String>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings()?;

    // --- Tracing Setup ---
    let level: tracing::Level = settings
        .app
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    // Parse command-line arguments.
    let cli = Cli::parse();

    tracing::info!(
        environment = %settings.app.environment,
        "Starting setup radar"
    );

    // Wire the data source the configuration asks for.
    let data: Arc<dyn MarketData> = match settings.provider.mode {
        ProviderMode::Live => Arc::new(ApiClient::new(&settings.provider)),
        ProviderMode::Demo => {
            tracing::warn!("Provider mode is 'demo': all results are simulated");
            Arc::new(DemoDataSource::new(settings.provider.demo_bars))
        }
    };

    let setup_analyzer = SetupAnalyzer::new(settings.scan.setup.clone())?;
    let tickers: Vec<Symbol> = settings
        .scan
        .tickers
        .iter()
        .map(|ticker| Symbol(ticker.clone()))
        .collect();
    let scanner = Arc::new(Scanner::new(data, setup_analyzer, tickers));

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Serve => {
            web_server::run(settings.server.clone(), scanner).await?;
        }
        Commands::Scan { ticker } => {
            let results = match ticker {
                Some(ticker) => {
                    let symbol = Symbol(ticker.to_uppercase());
                    vec![scanner.scan_one(&symbol).await?]
                }
                None => scanner.scan().await,
            };
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
