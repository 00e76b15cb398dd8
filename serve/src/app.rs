//! Axum app: shared state and the router.
//!
//! Dream routes live in [`crate::dreams`], journal routes in [`crate::journal_api`]. CORS
//! origins come from settings; `*` allows any origin.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use config::Settings;
use oneir::DreamAnalyzer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{dreams, journal_api};

/// Shared by every handler.
pub struct AppState {
    pub analyzer: Arc<DreamAnalyzer>,
    pub journal: Arc<journal::Store>,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(analyzer: DreamAnalyzer, journal: journal::Store) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            journal: Arc::new(journal),
            cors_origins: Vec::new(),
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Builds the analyzer and opens the journal database named in `settings`.
    pub fn from_settings(
        settings: &Settings,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let analyzer = DreamAnalyzer::from_settings(settings)?;
        let journal = journal::Store::new(&settings.journal_db)?;
        tracing::info!(
            text_model = analyzer.text_model(),
            image_provider = analyzer.image_provider().unwrap_or("none"),
            journal_db = %settings.journal_db,
            "app state ready"
        );
        Ok(Self::new(analyzer, journal).with_cors_origins(settings.cors_origins.clone()))
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o.trim() == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.trim().parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.cors_origins);
    Router::new()
        .route("/health", get(dreams::health))
        .route("/interpret", post(dreams::interpret))
        .route("/symbols", post(dreams::symbols))
        .route("/prompt", post(dreams::prompt))
        .route("/generate-image", post(dreams::generate_image))
        .route("/analyze", post(dreams::analyze))
        .route(
            "/journal",
            get(journal_api::list_entries).post(journal_api::add_entry),
        )
        .route("/journal/stats", get(journal_api::stats))
        .route(
            "/journal/:id",
            get(journal_api::get_entry)
                .put(journal_api::update_entry)
                .delete(journal_api::delete_entry),
        )
        .route("/journal/:id/favorite", post(journal_api::toggle_favorite))
        .route("/journal/:id/visualize", post(journal_api::visualize_entry))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
