use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::points::models::{NewPoint, PointOfInterest, PointUpdate};

/// Storage contract for point-of-interest records.
///
/// The store performs no validation; callers run the form validator first.
/// Each operation is a single statement against the `points` table.
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Insert a new record, stamping `created_at`; returns the assigned id.
    async fn create(&self, data: NewPoint) -> Result<i64>;

    /// Fetch one record by id.
    async fn get(&self, id: i64) -> Result<Option<PointOfInterest>>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<PointOfInterest>>;

    /// Overwrite the editable fields, stamping `updated_at`/`updated_by`
    /// together. `AppError::NotFound` when no row matches.
    async fn update(&self, id: i64, data: PointUpdate) -> Result<()>;

    /// Remove a record. `AppError::NotFound` when no row matches.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// PostgreSQL-backed store.
pub struct PgPointStore {
    pool: PgPool,
}

impl PgPointStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "id, name, latitude, longitude, created_at, updated_at, created_by, updated_by";

#[async_trait]
impl PointStore for PgPointStore {
    async fn create(&self, data: NewPoint) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO points (name, latitude, longitude, created_at, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(Utc::now())
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create point: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Point created: id={}, name={}", id, data.name);

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<PointOfInterest>> {
        sqlx::query_as::<_, PointOfInterest>(&format!(
            "SELECT {} FROM points WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get point {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn list(&self) -> Result<Vec<PointOfInterest>> {
        sqlx::query_as::<_, PointOfInterest>(&format!(
            "SELECT {} FROM points ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list points: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: i64, data: PointUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE points
            SET name = $1, latitude = $2, longitude = $3, updated_at = $4, updated_by = $5
            WHERE id = $6
            "#,
        )
        .bind(&data.name)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(Utc::now())
        .bind(data.updated_by)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update point {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Point {} not found", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM points WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete point {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Point {} not found", id)));
        }

        tracing::info!("Point deleted: id={}", id);

        Ok(())
    }
}
