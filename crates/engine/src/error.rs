// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ticker {0} is not in the configured scan list")]
    UnknownTicker(String),
    #[error("Market data fetch failed: {0}")]
    Fetch(#[from] api_client::Error),
    #[error("Analysis failed: {0}")]
    Analysis(#[from] analyzer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
