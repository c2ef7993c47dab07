use serde::{Deserialize, Serialize};

use crate::features::points::dtos::RawPointForm;
use crate::features::points::models::PointOfInterest;

/// Query params for the add page; `created` carries the id of a point that
/// was just saved through the post/redirect/get cycle.
#[derive(Debug, Deserialize)]
pub struct AddPageQuery {
    #[serde(default)]
    pub created: Option<i64>,
}

/// Body of an admin form submission. Field names match the rendered form;
/// everything defaults so a malformed body still deserializes and fails
/// validation instead of the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct PointSubmission {
    #[serde(default, rename = "_token")]
    pub token: String,
    /// "save" or "delete" on the edit page; unused on the add page.
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

impl PointSubmission {
    pub fn fields(&self) -> RawPointForm {
        RawPointForm {
            name: self.name.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
        }
    }
}

/// One row of the list table, all fields preformatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct PointRowDto {
    pub id: i64,
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub created: String,
    pub created_by: String,
    pub updated: String,
    pub updated_by: String,
}

/// View-model for the list page.
#[derive(Debug, Clone, Serialize)]
pub struct ListViewDto {
    pub rows: Vec<PointRowDto>,
}

/// The three editable fields as they should appear in the form inputs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormDto {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl From<RawPointForm> for FormDto {
    fn from(form: RawPointForm) -> Self {
        Self {
            name: form.name,
            latitude: form.latitude,
            longitude: form.longitude,
        }
    }
}

impl From<&PointOfInterest> for FormDto {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            name: point.name.clone(),
            latitude: point.latitude.to_string(),
            longitude: point.longitude.to_string(),
        }
    }
}

/// Coordinates and label the admin map preview binds to.
#[derive(Debug, Clone, Serialize)]
pub struct MapPreviewDto {
    pub lat: String,
    pub lng: String,
    pub name: String,
}

/// Attribution block shown next to the edit form.
#[derive(Debug, Clone, Serialize)]
pub struct MetaDto {
    pub created: String,
    pub created_by: String,
    pub updated: String,
    pub updated_by: String,
}

/// View-model for the add page.
#[derive(Debug, Clone, Serialize)]
pub struct AddViewDto {
    pub form: FormDto,
    pub errors: Vec<String>,
    pub created_id: Option<i64>,
    /// Embed directive text shown once a point has been created.
    pub directive: Option<String>,
    pub token: String,
}

/// View-model for the edit page.
#[derive(Debug, Clone, Serialize)]
pub struct EditViewDto {
    pub id: i64,
    pub form: FormDto,
    pub errors: Vec<String>,
    pub notice: Option<String>,
    pub map: MapPreviewDto,
    pub meta: MetaDto,
    pub directive: String,
    pub save_token: String,
    pub delete_token: String,
}
