// In crates/web-server/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),
    #[error("Scan failed: {0}")]
    Scan(#[from] engine::Error),
    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),
    #[error("Server error: {0}")]
    ServerError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Every handler failure becomes a JSON `{"error": …}` body with a status
/// matching the failure class.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            // Provider-side failures are the upstream's fault.
            Error::Scan(engine::Error::Fetch(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
