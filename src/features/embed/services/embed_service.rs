use std::sync::Arc;

use lazy_static::lazy_static;
use minijinja::context;
use regex::Regex;
use uuid::Uuid;

use crate::features::points::PointStore;
use crate::shared::templates;

lazy_static! {
    /// The embed directive as it appears in content: `[poimap id="42"]`.
    /// Quotes around the id are optional, and so is the id itself; a
    /// directive without one resolves like id 0.
    static ref DIRECTIVE_REGEX: Regex =
        Regex::new(r#"\[poimap(?:\s+id="?(\d+)"?)?\s*\]"#).unwrap();
}

/// The directive text a content author pastes to embed a point.
pub fn directive_text(id: i64) -> String {
    format!("[poimap id=\"{}\"]", id)
}

/// Renders map-embed fragments for public pages.
pub struct EmbedService {
    store: Arc<dyn PointStore>,
}

impl EmbedService {
    pub fn new(store: Arc<dyn PointStore>) -> Self {
        Self { store }
    }

    /// Render the embed fragment for one point. Non-positive ids, unknown
    /// ids and datastore failures all yield the placeholder paragraph; this
    /// method never fails the surrounding page render.
    pub async fn render_embed(&self, id: i64) -> String {
        if id <= 0 {
            return self.placeholder();
        }

        let point = match self.store.get(id).await {
            Ok(Some(point)) => point,
            Ok(None) => return self.placeholder(),
            Err(e) => {
                tracing::error!("Embed lookup failed for point {}: {:?}", id, e);
                return self.placeholder();
            }
        };

        // Unique per render so the same point can be embedded several times
        // on one page without DOM id collisions.
        let dom_id = format!("poimap-map-{}-{}", point.id, Uuid::new_v4());

        templates::render(
            "embed/fragment.html",
            context! {
                dom_id,
                lat => point.latitude.to_string(),
                lng => point.longitude.to_string(),
                name => point.name,
            },
        )
        .unwrap_or_else(|e| {
            tracing::error!("Embed fragment render failed: {}", e);
            self.placeholder()
        })
    }

    /// Replace every embed directive in a content string with its rendered
    /// fragment. Unresolvable directives become placeholders in place.
    pub async fn expand_directives(&self, content: &str) -> String {
        let mut output = String::with_capacity(content.len());
        let mut last_end = 0;

        for captures in DIRECTIVE_REGEX.captures_iter(content) {
            let whole = captures.get(0).expect("regex match has a full capture");
            output.push_str(&content[last_end..whole.start()]);

            let id = captures
                .get(1)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .unwrap_or(0);
            output.push_str(&self.render_embed(id).await);

            last_end = whole.end();
        }

        output.push_str(&content[last_end..]);
        output
    }

    fn placeholder(&self) -> String {
        templates::render("embed/missing.html", context! {}).unwrap_or_else(|_| {
            "<p class=\"poimap-missing\">Point of interest not found.</p>".to_string()
        })
    }
}
