//! Stagebook: a directory of venues, artists and the shows that connect them
//!
//! The library exposes every module so the binary and the integration tests
//! share one router.

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .merge(handlers::html_routes())

        // Stylesheets and images
        .nest_service("/static", ServeDir::new(static_dir))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
