// In crates/analyzer/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Insufficient data: need at least {required} bars, got {got}")]
    InsufficientData { required: usize, got: usize },
    #[error("Invalid analyzer settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
