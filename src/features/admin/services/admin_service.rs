use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    AddViewDto, EditViewDto, FormDto, ListViewDto, MapPreviewDto, MetaDto, PointRowDto,
    PointSubmission,
};
use crate::features::auth::{Actor, ActorDirectory, PermissionChecker, RequestTokenService};
use crate::features::embed::services::embed_service::directive_text;
use crate::features::points::models::{NewPoint, PointOfInterest, PointUpdate};
use crate::features::points::services::form_validator;
use crate::features::points::PointStore;

/// Token action names, one per protected form.
const ADD_ACTION: &str = "add-point";
const SAVE_ACTION: &str = "save-point";
const DELETE_ACTION: &str = "delete-point";

const TOKEN_REJECTED_MESSAGE: &str = "The request could not be verified. Please try again.";
const CREATE_FAILED_MESSAGE: &str = "An error occurred while saving. Please try again.";
const UPDATE_FAILED_MESSAGE: &str = "An error occurred while updating. Please try again.";

/// Outcome of an add-page submission.
#[derive(Debug)]
pub enum AddOutcome {
    /// Record created; redirect to the add page with `?created=<id>`.
    Created(i64),
    /// Submission rejected; redisplay the form with errors and prior input.
    Rejected(AddViewDto),
}

/// Outcome of an edit-page submission.
#[derive(Debug)]
pub enum EditOutcome {
    /// Record updated; redisplay with refreshed values and a notice.
    Saved(EditViewDto),
    /// Submission rejected; redisplay with errors and prior input.
    Rejected(EditViewDto),
    /// Record deleted; redirect to the list page.
    Deleted,
}

/// Controller for the admin pages.
///
/// Stateless per request; all collaborators are injected. Methods compute
/// view-models only — rendering happens in the handlers.
pub struct AdminService {
    store: Arc<dyn PointStore>,
    directory: Arc<dyn ActorDirectory>,
    tokens: Arc<RequestTokenService>,
    permissions: Arc<dyn PermissionChecker>,
}

impl AdminService {
    pub fn new(
        store: Arc<dyn PointStore>,
        directory: Arc<dyn ActorDirectory>,
        tokens: Arc<RequestTokenService>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            store,
            directory,
            tokens,
            permissions,
        }
    }

    pub fn can_manage(&self, actor: &Actor) -> bool {
        self.permissions.can_manage(actor)
    }

    /// View-model for the list page.
    pub async fn list_view(&self) -> Result<ListViewDto> {
        let points = self.store.list().await?;

        let mut rows = Vec::with_capacity(points.len());
        for point in points {
            rows.push(PointRowDto {
                id: point.id,
                name: point.name.clone(),
                latitude: point.latitude.to_string(),
                longitude: point.longitude.to_string(),
                created: format_timestamp(point.created_at),
                created_by: self.format_actor(point.created_by).await,
                updated: match point.updated_at {
                    Some(at) => format_timestamp(at),
                    None => "Never".to_string(),
                },
                updated_by: match point.updated_by {
                    Some(id) => self.format_actor(Some(id)).await,
                    None => "N/A".to_string(),
                },
            });
        }

        Ok(ListViewDto { rows })
    }

    /// View-model for the add page. `created` is the id carried back by the
    /// post/redirect/get cycle and switches the success notice on.
    pub fn add_view(&self, created: Option<i64>) -> AddViewDto {
        let created = created.filter(|id| *id > 0);
        AddViewDto {
            form: FormDto::default(),
            errors: Vec::new(),
            created_id: created,
            directive: created.map(directive_text),
            token: self.tokens.issue(ADD_ACTION),
        }
    }

    /// Handle an add-page submission.
    pub async fn submit_add(&self, actor: &Actor, submission: &PointSubmission) -> Result<AddOutcome> {
        let (sanitized, outcome) = form_validator::check(&submission.fields());

        if !self.tokens.verify(ADD_ACTION, &submission.token) {
            return Ok(AddOutcome::Rejected(self.rejected_add_view(
                sanitized.into(),
                vec![TOKEN_REJECTED_MESSAGE.to_string()],
            )));
        }

        let validated = match outcome {
            Ok(validated) => validated,
            Err(errors) => {
                return Ok(AddOutcome::Rejected(
                    self.rejected_add_view(sanitized.into(), errors),
                ))
            }
        };

        let result = self
            .store
            .create(NewPoint {
                name: validated.name,
                latitude: validated.latitude,
                longitude: validated.longitude,
                created_by: Some(actor.id),
            })
            .await;

        match result {
            Ok(id) => Ok(AddOutcome::Created(id)),
            Err(AppError::Database(e)) => {
                tracing::error!("Create failed, redisplaying form: {:?}", e);
                Ok(AddOutcome::Rejected(self.rejected_add_view(
                    sanitized.into(),
                    vec![CREATE_FAILED_MESSAGE.to_string()],
                )))
            }
            Err(e) => Err(e),
        }
    }

    /// View-model for the edit page. Unknown or non-positive ids are a
    /// terminal not-found view, no form.
    pub async fn edit_view(&self, id: i64) -> Result<EditViewDto> {
        let point = self.fetch(id).await?;
        Ok(self
            .edit_view_for(&point, (&point).into(), Vec::new(), None)
            .await)
    }

    /// Handle an edit-page submission (`action=save` or `action=delete`).
    pub async fn submit_edit(
        &self,
        actor: &Actor,
        id: i64,
        submission: &PointSubmission,
    ) -> Result<EditOutcome> {
        let point = self.fetch(id).await?;

        if submission.action == "delete" {
            if !self.tokens.verify(DELETE_ACTION, &submission.token) {
                return Ok(EditOutcome::Rejected(
                    self.edit_view_for(
                        &point,
                        (&point).into(),
                        vec![TOKEN_REJECTED_MESSAGE.to_string()],
                        None,
                    )
                    .await,
                ));
            }
            self.store.delete(id).await?;
            return Ok(EditOutcome::Deleted);
        }

        let (sanitized, outcome) = form_validator::check(&submission.fields());

        if !self.tokens.verify(SAVE_ACTION, &submission.token) {
            return Ok(EditOutcome::Rejected(
                self.edit_view_for(
                    &point,
                    sanitized.into(),
                    vec![TOKEN_REJECTED_MESSAGE.to_string()],
                    None,
                )
                .await,
            ));
        }

        let validated = match outcome {
            Ok(validated) => validated,
            Err(errors) => {
                return Ok(EditOutcome::Rejected(
                    self.edit_view_for(&point, sanitized.into(), errors, None).await,
                ))
            }
        };

        let result = self
            .store
            .update(
                id,
                PointUpdate {
                    name: validated.name,
                    latitude: validated.latitude,
                    longitude: validated.longitude,
                    updated_by: Some(actor.id),
                },
            )
            .await;

        match result {
            Ok(()) => {
                let refreshed = self.fetch(id).await?;
                Ok(EditOutcome::Saved(
                    self.edit_view_for(
                        &refreshed,
                        (&refreshed).into(),
                        Vec::new(),
                        Some("Point of interest updated.".to_string()),
                    )
                    .await,
                ))
            }
            Err(AppError::Database(e)) => {
                tracing::error!("Update failed, redisplaying form: {:?}", e);
                Ok(EditOutcome::Rejected(
                    self.edit_view_for(
                        &point,
                        sanitized.into(),
                        vec![UPDATE_FAILED_MESSAGE.to_string()],
                        None,
                    )
                    .await,
                ))
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch(&self, id: i64) -> Result<PointOfInterest> {
        if id <= 0 {
            return Err(AppError::NotFound("Invalid identifier.".to_string()));
        }
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Point of interest not found.".to_string()))
    }

    fn rejected_add_view(&self, form: FormDto, errors: Vec<String>) -> AddViewDto {
        AddViewDto {
            form,
            errors,
            created_id: None,
            directive: None,
            token: self.tokens.issue(ADD_ACTION),
        }
    }

    /// Assemble the edit view. The map preview binds to the stored record,
    /// not to the (possibly invalid) submitted values.
    async fn edit_view_for(
        &self,
        point: &PointOfInterest,
        form: FormDto,
        errors: Vec<String>,
        notice: Option<String>,
    ) -> EditViewDto {
        EditViewDto {
            id: point.id,
            form,
            errors,
            notice,
            map: MapPreviewDto {
                lat: point.latitude.to_string(),
                lng: point.longitude.to_string(),
                name: point.name.clone(),
            },
            meta: MetaDto {
                created: format_timestamp(point.created_at),
                created_by: self.format_actor(point.created_by).await,
                updated: match point.updated_at {
                    Some(at) => format_timestamp(at),
                    None => "Never".to_string(),
                },
                updated_by: match point.updated_by {
                    Some(id) => self.format_actor(Some(id)).await,
                    None => "N/A".to_string(),
                },
            },
            directive: directive_text(point.id),
            save_token: self.tokens.issue(SAVE_ACTION),
            delete_token: self.tokens.issue(DELETE_ACTION),
        }
    }

    async fn format_actor(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => self
                .directory
                .display_name(id)
                .await
                .unwrap_or_else(|| "Unknown".to_string()),
            None => "Unknown".to_string(),
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{RolePermissionChecker, StaticActorDirectory};
    use crate::features::points::InMemoryPointStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Store double whose writes always fail, for the generic-error paths.
    struct FailingStore;

    #[async_trait]
    impl PointStore for FailingStore {
        async fn create(&self, _data: NewPoint) -> Result<i64> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
        async fn get(&self, _id: i64) -> Result<Option<PointOfInterest>> {
            Ok(Some(sample_point()))
        }
        async fn list(&self) -> Result<Vec<PointOfInterest>> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
        async fn update(&self, _id: i64, _data: PointUpdate) -> Result<()> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
        async fn delete(&self, _id: i64) -> Result<()> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
    }

    fn sample_point() -> PointOfInterest {
        PointOfInterest {
            id: 1,
            name: "Eiffel Tower".to_string(),
            latitude: "48.8584".parse().unwrap(),
            longitude: "2.2945".parse().unwrap(),
            created_at: Utc::now(),
            updated_at: None,
            created_by: Some(1),
            updated_by: None,
        }
    }

    fn actor() -> Actor {
        Actor {
            id: 1,
            display_name: "Alice".to_string(),
            roles: vec!["manage_points".to_string()],
        }
    }

    fn service_with(store: Arc<dyn PointStore>) -> (AdminService, Arc<RequestTokenService>) {
        let tokens = Arc::new(RequestTokenService::new(
            "test-secret",
            Duration::from_secs(3600),
        ));
        let mut names = HashMap::new();
        names.insert(1, "Alice".to_string());
        let service = AdminService::new(
            store,
            Arc::new(StaticActorDirectory::new(names)),
            Arc::clone(&tokens),
            Arc::new(RolePermissionChecker::new("manage_points")),
        );
        (service, tokens)
    }

    fn submission(token: &str, action: &str, name: &str, lat: &str, lng: &str) -> PointSubmission {
        PointSubmission {
            token: token.to_string(),
            action: action.to_string(),
            name: name.to_string(),
            latitude: lat.to_string(),
            longitude: lng.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_add_creates_record() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, tokens) = service_with(store.clone());
        let token = tokens.issue("add-point");

        let outcome = service
            .submit_add(
                &actor(),
                &submission(&token, "", "Eiffel Tower", "48.8584", "2.2945"),
            )
            .await
            .unwrap();

        let AddOutcome::Created(id) = outcome else {
            panic!("expected creation");
        };
        let point = store.get(id).await.unwrap().unwrap();
        assert_eq!(point.name, "Eiffel Tower");
        assert_eq!(point.created_by, Some(1));
        assert!(point.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_submit_add_invalid_token_rejected_and_nothing_persisted() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, _tokens) = service_with(store.clone());

        let outcome = service
            .submit_add(
                &actor(),
                &submission("bogus", "", "Eiffel Tower", "48.8584", "2.2945"),
            )
            .await
            .unwrap();

        let AddOutcome::Rejected(view) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(view.errors, vec![TOKEN_REJECTED_MESSAGE.to_string()]);
        // Submitted values are retained for redisplay.
        assert_eq!(view.form.name, "Eiffel Tower");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_add_out_of_range_latitude_keeps_other_fields() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, tokens) = service_with(store.clone());
        let token = tokens.issue("add-point");

        let outcome = service
            .submit_add(&actor(), &submission(&token, "", "Somewhere", "120", "2.2945"))
            .await
            .unwrap();

        let AddOutcome::Rejected(view) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(
            view.errors,
            vec!["Latitude must be between -90 and 90.".to_string()]
        );
        assert_eq!(view.form.name, "Somewhere");
        assert_eq!(view.form.longitude, "2.2945");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_add_store_failure_is_generic_message() {
        let (service, tokens) = service_with(Arc::new(FailingStore));
        let token = tokens.issue("add-point");

        let outcome = service
            .submit_add(
                &actor(),
                &submission(&token, "", "Eiffel Tower", "48.8584", "2.2945"),
            )
            .await
            .unwrap();

        let AddOutcome::Rejected(view) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(view.errors, vec![CREATE_FAILED_MESSAGE.to_string()]);
        assert_eq!(view.form.name, "Eiffel Tower");
    }

    #[tokio::test]
    async fn test_edit_view_unknown_id_is_not_found() {
        let (service, _tokens) = service_with(Arc::new(InMemoryPointStore::new()));
        assert!(matches!(
            service.edit_view(42).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.edit_view(0).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_edit_save_updates_and_notices() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, tokens) = service_with(store.clone());
        let id = store
            .create(NewPoint {
                name: "Eiffel Tower".to_string(),
                latitude: "48.8584".parse().unwrap(),
                longitude: "2.2945".parse().unwrap(),
                created_by: Some(1),
            })
            .await
            .unwrap();

        let token = tokens.issue("save-point");
        let outcome = service
            .submit_edit(
                &actor(),
                id,
                &submission(&token, "save", "Tour Eiffel", "48.8584", "2.2945"),
            )
            .await
            .unwrap();

        let EditOutcome::Saved(view) = outcome else {
            panic!("expected save");
        };
        assert_eq!(view.notice.as_deref(), Some("Point of interest updated."));
        assert_eq!(view.form.name, "Tour Eiffel");
        assert_eq!(view.meta.updated_by, "Alice");

        let point = store.get(id).await.unwrap().unwrap();
        assert_eq!(point.name, "Tour Eiffel");
        assert!(point.updated_at.is_some());
        assert_eq!(point.updated_by, Some(1));
    }

    #[tokio::test]
    async fn test_submit_edit_delete_removes_record() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, tokens) = service_with(store.clone());
        let id = store
            .create(NewPoint {
                name: "Eiffel Tower".to_string(),
                latitude: "48.8584".parse().unwrap(),
                longitude: "2.2945".parse().unwrap(),
                created_by: None,
            })
            .await
            .unwrap();

        let token = tokens.issue("delete-point");
        let outcome = service
            .submit_edit(&actor(), id, &submission(&token, "delete", "", "", ""))
            .await
            .unwrap();

        assert!(matches!(outcome, EditOutcome::Deleted));
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submit_edit_delete_with_save_token_rejected() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, tokens) = service_with(store.clone());
        let id = store
            .create(NewPoint {
                name: "Eiffel Tower".to_string(),
                latitude: "48.8584".parse().unwrap(),
                longitude: "2.2945".parse().unwrap(),
                created_by: None,
            })
            .await
            .unwrap();

        // A token for the wrong action must not authorize a delete.
        let token = tokens.issue("save-point");
        let outcome = service
            .submit_edit(&actor(), id, &submission(&token, "delete", "", "", ""))
            .await
            .unwrap();

        assert!(matches!(outcome, EditOutcome::Rejected(_)));
        assert!(store.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_view_formats_attribution() {
        let store = Arc::new(InMemoryPointStore::new());
        let (service, _tokens) = service_with(store.clone());
        store
            .create(NewPoint {
                name: "Eiffel Tower".to_string(),
                latitude: "48.8584".parse().unwrap(),
                longitude: "2.2945".parse().unwrap(),
                created_by: Some(1),
            })
            .await
            .unwrap();
        store
            .create(NewPoint {
                name: "Mystery".to_string(),
                latitude: "0".parse().unwrap(),
                longitude: "0".parse().unwrap(),
                created_by: Some(99),
            })
            .await
            .unwrap();

        let view = service.list_view().await.unwrap();
        assert_eq!(view.rows.len(), 2);

        // Newest first: the unresolvable actor renders as Unknown.
        assert_eq!(view.rows[0].created_by, "Unknown");
        assert_eq!(view.rows[1].created_by, "Alice");
        assert_eq!(view.rows[0].updated, "Never");
        assert_eq!(view.rows[0].updated_by, "N/A");
    }

    #[test]
    fn test_add_view_ignores_non_positive_created_id() {
        let (service, _tokens) = service_with(Arc::new(InMemoryPointStore::new()));
        assert!(service.add_view(Some(0)).created_id.is_none());
        assert!(service.add_view(Some(-3)).directive.is_none());
        assert_eq!(service.add_view(Some(7)).directive.as_deref(), Some("[poimap id=\"7\"]"));
    }
}
