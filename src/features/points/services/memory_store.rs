//! In-memory store used by tests and demo wiring.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::points::models::{NewPoint, PointOfInterest, PointUpdate};
use crate::features::points::services::point_store::PointStore;

/// Thread-safe in-memory implementation of [`PointStore`].
///
/// Semantics match the PostgreSQL store: ids are assigned once and never
/// reused, listing is newest first, update/delete report not-found.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPointStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    points: BTreeMap<i64, PointOfInterest>,
    next_id: i64,
}

impl InMemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PointStore for InMemoryPointStore {
    async fn create(&self, data: NewPoint) -> Result<i64> {
        let mut state = self
            .state
            .write()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        state.next_id += 1;
        let id = state.next_id;
        state.points.insert(
            id,
            PointOfInterest {
                id,
                name: data.name,
                latitude: data.latitude,
                longitude: data.longitude,
                created_at: Utc::now(),
                updated_at: None,
                created_by: data.created_by,
                updated_by: None,
            },
        );
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<PointOfInterest>> {
        let state = self
            .state
            .read()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(state.points.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<PointOfInterest>> {
        let state = self
            .state
            .read()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let mut points: Vec<PointOfInterest> = state.points.values().cloned().collect();
        points.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(points)
    }

    async fn update(&self, id: i64, data: PointUpdate) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let point = state
            .points
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Point {} not found", id)))?;

        point.name = data.name;
        point.latitude = data.latitude;
        point.longitude = data.longitude;
        point.updated_at = Some(Utc::now());
        point.updated_by = data.updated_by;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        state
            .points
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Point {} not found", id)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn new_point(name: &str, lat: &str, lng: &str, actor: Option<i64>) -> NewPoint {
        NewPoint {
            name: name.to_string(),
            latitude: Decimal::from_str(lat).unwrap(),
            longitude: Decimal::from_str(lng).unwrap(),
            created_by: actor,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = InMemoryPointStore::new();
        let id = store
            .create(new_point("Eiffel Tower", "48.8584", "2.2945", Some(1)))
            .await
            .unwrap();

        let point = store.get(id).await.unwrap().unwrap();
        assert_eq!(point.id, id);
        assert_eq!(point.name, "Eiffel Tower");
        assert_eq!(point.latitude, Decimal::from_str("48.8584").unwrap());
        assert_eq!(point.longitude, Decimal::from_str("2.2945").unwrap());
        assert_eq!(point.created_by, Some(1));
        assert!(point.updated_at.is_none());
        assert!(point.updated_by.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_assigned_once_and_never_reused() {
        let store = InMemoryPointStore::new();
        let first = store
            .create(new_point("A", "1", "1", None))
            .await
            .unwrap();
        store.delete(first).await.unwrap();
        let second = store.create(new_point("B", "2", "2", None)).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_update_stamps_audit_fields_together() {
        let store = InMemoryPointStore::new();
        let id = store
            .create(new_point("Louvre", "48.8606", "2.3376", Some(1)))
            .await
            .unwrap();
        let created = store.get(id).await.unwrap().unwrap();

        store
            .update(
                id,
                PointUpdate {
                    name: "Louvre Museum".to_string(),
                    latitude: Decimal::from_str("48.8611").unwrap(),
                    longitude: Decimal::from_str("2.3364").unwrap(),
                    updated_by: Some(2),
                },
            )
            .await
            .unwrap();

        let updated = store.get(id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Louvre Museum");
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.updated_by, Some(2));
        // Creation attribution is immutable.
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.created_by, created.created_by);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let store = InMemoryPointStore::new();
        let result = store
            .update(
                42,
                PointUpdate {
                    name: "Nowhere".to_string(),
                    latitude: Decimal::ZERO,
                    longitude: Decimal::ZERO,
                    updated_by: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_gone() {
        let store = InMemoryPointStore::new();
        let id = store.create(new_point("A", "1", "1", None)).await.unwrap();
        store.delete(id).await.unwrap();
        assert!(store.get(id).await.unwrap().is_none());

        // Deleting again reports not-found without side effects.
        assert!(matches!(
            store.delete(id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryPointStore::new();
        store.create(new_point("First", "1", "1", None)).await.unwrap();
        store.create(new_point("Second", "2", "2", None)).await.unwrap();
        store.create(new_point("Third", "3", "3", None)).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }
}
