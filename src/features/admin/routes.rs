use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for the admin feature
///
/// Authorization is checked inside each handler (`can_manage`); unauthorized
/// requests get an empty body rather than a rejection.
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/admin/points", get(handlers::show_list))
        .route(
            "/admin/points/new",
            get(handlers::show_add).post(handlers::submit_add),
        )
        .route(
            "/admin/points/{id}/edit",
            get(handlers::show_edit).post(handlers::submit_edit),
        )
        .with_state(service)
}
