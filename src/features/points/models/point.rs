use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for a point of interest.
///
/// `updated_at` and `updated_by` are either both unset (never edited) or both
/// set; the store stamps them together on every update.
#[derive(Debug, Clone, FromRow)]
pub struct PointOfInterest {
    pub id: i64,
    pub name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
}

/// Data for inserting a new point. Coordinates are already validated.
#[derive(Debug, Clone)]
pub struct NewPoint {
    pub name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub created_by: Option<i64>,
}

/// Full overwrite of the editable fields of an existing point.
#[derive(Debug, Clone)]
pub struct PointUpdate {
    pub name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub updated_by: Option<i64>,
}
