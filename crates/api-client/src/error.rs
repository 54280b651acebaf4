// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Provider error: status {status}, msg: {msg}")]
    ApiError { status: u16, msg: String },
    #[error("Provider returned no usable history for {0}")]
    EmptyHistory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
