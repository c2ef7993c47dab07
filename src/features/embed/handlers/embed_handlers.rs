use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;

use crate::core::error::Result;
use crate::features::embed::services::EmbedService;
use crate::shared::templates;

/// Parse the id path segment leniently; anything unparseable resolves to 0,
/// which the renderer turns into the placeholder.
fn parse_id(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Serve the bare embed fragment for one point.
///
/// Always responds 200 with either the map container or the placeholder
/// paragraph; a bad id must never break the page that includes the fragment.
pub async fn show_embed(
    State(service): State<Arc<EmbedService>>,
    Path(id): Path<String>,
) -> Html<String> {
    Html(service.render_embed(parse_id(&id)).await)
}

/// Serve a full standalone page for one point, declaring the map widget
/// assets the fragment needs.
pub async fn show_map_page(
    State(service): State<Arc<EmbedService>>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let fragment = service.render_embed(parse_id(&id)).await;
    let html = templates::render("embed/page.html", context! { fragment })?;
    Ok(Html(html))
}
