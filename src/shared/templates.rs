//! HTML rendering boundary.
//!
//! Templates only receive precomputed view-models; no business logic runs in
//! here. The environment is built once and templates are embedded in the
//! binary, with auto-escaping on (`.html` names).

use std::sync::OnceLock;

use minijinja::{Environment, Value};
use thiserror::Error;

use crate::core::error::AppError;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::Template(e.to_string())
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    (
        "admin/list.html",
        include_str!("../../templates/admin/list.html"),
    ),
    (
        "admin/add.html",
        include_str!("../../templates/admin/add.html"),
    ),
    (
        "admin/edit.html",
        include_str!("../../templates/admin/edit.html"),
    ),
    (
        "embed/fragment.html",
        include_str!("../../templates/embed/fragment.html"),
    ),
    (
        "embed/missing.html",
        include_str!("../../templates/embed/missing.html"),
    ),
    (
        "embed/page.html",
        include_str!("../../templates/embed/page.html"),
    ),
];

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        }
    }
    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
pub fn render(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_unknown_template_is_not_found() {
        let result = render("definitely_not_a_real_template.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_html_is_escaped() {
        let html = render(
            "embed/fragment.html",
            context! {
                dom_id => "poimap-map-1-test",
                lat => "48.8584",
                lng => "2.2945",
                name => "<script>alert(1)</script>",
            },
        )
        .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
