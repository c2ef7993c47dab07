use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::embed::handlers;
use crate::features::embed::services::EmbedService;

/// Create routes for the embed feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<EmbedService>) -> Router {
    Router::new()
        .route("/embed/{id}", get(handlers::show_embed))
        .route("/points/{id}/map", get(handlers::show_map_page))
        .with_state(service)
}
