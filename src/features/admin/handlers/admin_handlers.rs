use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use minijinja::context;

use crate::core::error::Result;
use crate::features::admin::dtos::{AddPageQuery, PointSubmission};
use crate::features::admin::services::{AddOutcome, AdminService, EditOutcome};
use crate::features::auth::Actor;
use crate::shared::templates;

/// Resolve the managing actor for an admin request. `None` means the page
/// must render an empty body: unauthorized access is a silent no-op, not an
/// error page.
fn manager(service: &AdminService, actor: Option<Extension<Actor>>) -> Option<Actor> {
    let Extension(actor) = actor?;
    service.can_manage(&actor).then_some(actor)
}

fn empty_page() -> Response {
    Html(String::new()).into_response()
}

/// List page: read-only table of every point.
pub async fn show_list(
    State(service): State<Arc<AdminService>>,
    actor: Option<Extension<Actor>>,
) -> Result<Response> {
    if manager(&service, actor).is_none() {
        return Ok(empty_page());
    }

    let view = service.list_view().await?;
    let html = templates::render("admin/list.html", context! { view })?;
    Ok(Html(html).into_response())
}

/// Add page: empty form, or the success notice after a redirect.
pub async fn show_add(
    State(service): State<Arc<AdminService>>,
    actor: Option<Extension<Actor>>,
    Query(query): Query<AddPageQuery>,
) -> Result<Response> {
    if manager(&service, actor).is_none() {
        return Ok(empty_page());
    }

    let view = service.add_view(query.created);
    let html = templates::render("admin/add.html", context! { view })?;
    Ok(Html(html).into_response())
}

/// Add form submission. A successful create redirects back to the add page
/// with the new id so a refresh cannot duplicate the record.
pub async fn submit_add(
    State(service): State<Arc<AdminService>>,
    actor: Option<Extension<Actor>>,
    Form(submission): Form<PointSubmission>,
) -> Result<Response> {
    let Some(actor) = manager(&service, actor) else {
        return Ok(empty_page());
    };

    match service.submit_add(&actor, &submission).await? {
        AddOutcome::Created(id) => {
            Ok(Redirect::to(&format!("/admin/points/new?created={}", id)).into_response())
        }
        AddOutcome::Rejected(view) => {
            let html = templates::render("admin/add.html", context! { view })?;
            Ok(Html(html).into_response())
        }
    }
}

/// Edit page: pre-filled form plus the live map preview.
pub async fn show_edit(
    State(service): State<Arc<AdminService>>,
    actor: Option<Extension<Actor>>,
    Path(id): Path<i64>,
) -> Result<Response> {
    if manager(&service, actor).is_none() {
        return Ok(empty_page());
    }

    let view = service.edit_view(id).await?;
    let html = templates::render("admin/edit.html", context! { view })?;
    Ok(Html(html).into_response())
}

/// Edit form submission: `action=save` updates, `action=delete` removes the
/// record and returns to the list.
pub async fn submit_edit(
    State(service): State<Arc<AdminService>>,
    actor: Option<Extension<Actor>>,
    Path(id): Path<i64>,
    Form(submission): Form<PointSubmission>,
) -> Result<Response> {
    let Some(actor) = manager(&service, actor) else {
        return Ok(empty_page());
    };

    match service.submit_edit(&actor, id, &submission).await? {
        EditOutcome::Deleted => Ok(Redirect::to("/admin/points").into_response()),
        EditOutcome::Saved(view) | EditOutcome::Rejected(view) => {
            let html = templates::render("admin/edit.html", context! { view })?;
            Ok(Html(html).into_response())
        }
    }
}
