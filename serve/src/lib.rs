//! HTTP JSON API for OneirVision (axum).
//!
//! Listens on `127.0.0.1:5000` by default. Routes cover dream interpretation, symbol lookup,
//! prompt preview, image generation, combined analysis, the dream journal, and `/health`.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`AppState`], [`router`].

mod app;
mod dreams;
mod error;
mod journal_api;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub use app::{router, AppState};
pub use error::ApiError;

/// Serves on an existing listener. Tests bind `127.0.0.1:0` and pass the listener in.
pub async fn run_serve_on_listener(
    listener: TcpListener,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}", addr);
    let app = router(Arc::new(state));
    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds state from `settings` and serves on `addr`, or `settings.bind_addr` when `None`.
pub async fn run_serve(
    settings: &config::Settings,
    addr: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::from_settings(settings)?;
    let addr = addr.unwrap_or(&settings.bind_addr);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, state).await
}
