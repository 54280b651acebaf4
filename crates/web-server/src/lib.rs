// In crates/web-server/src/lib.rs

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use app_config::types::ServerSettings;
use core_types::{AnalysisResult, Symbol};
use engine::Scanner;
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod error;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
///
/// It is wrapped in an `Arc` to allow for safe concurrent access.
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<Scanner>,
}

/// Creates the main application router with all routes and middleware.
///
/// # Arguments
///
/// * `app_state`: The shared `AppState` containing the scanner.
///
/// # Returns
///
/// The configured `axum::Router`.
pub fn create_router(app_state: AppState) -> Router {
    // Define a CORS layer to allow requests from our frontend.
    // In a production environment, you would restrict the origin to your actual frontend domain.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any) // For development, allow any origin
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    // Define the API sub-router
    let api_router = Router::new()
        .route("/analysis", get(get_analysis_handler))
        .route("/analysis/{ticker}", get(get_ticker_analysis_handler));

    // The main router.
    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
/// Responds with a 200 OK and a plain body.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /api/analysis`.
/// Runs a fresh scan over every configured ticker. Per-ticker failures are
/// already folded into placeholder entries, so this always answers 200 with
/// one entry per ticker.
async fn get_analysis_handler(State(state): State<AppState>) -> Json<Vec<AnalysisResult>> {
    let results = state.scanner.scan().await;
    tracing::info!(tickers = results.len(), "scan finished");
    Json(results)
}

/// Handler for `GET /api/analysis/{ticker}`.
async fn get_ticker_analysis_handler(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<AnalysisResult>> {
    let symbol = Symbol(ticker.to_uppercase());

    match state.scanner.scan_one(&symbol).await {
        Ok(result) => Ok(Json(result)),
        Err(engine::Error::UnknownTicker(ticker)) => {
            tracing::warn!(%ticker, "request for unconfigured ticker");
            Err(Error::NotFound(format!("Ticker {} is not scanned", ticker)))
        }
        Err(err) => Err(err.into()),
    }
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings, scanner: Arc<Scanner>) -> Result<()> {
    let app_state = AppState { scanner };
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServerError)?;

    Ok(())
}
