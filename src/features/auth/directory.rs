use std::collections::HashMap;

use async_trait::async_trait;

/// Resolves stored actor references to display names.
///
/// The user store itself belongs to the hosting environment; this seam lets
/// the admin screens show "created by Alice" without owning user records.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    async fn display_name(&self, id: i64) -> Option<String>;
}

/// Directory backed by the `ACTOR_DISPLAY_NAMES` configuration mapping.
pub struct StaticActorDirectory {
    entries: HashMap<i64, String>,
}

impl StaticActorDirectory {
    pub fn new(entries: HashMap<i64, String>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ActorDirectory for StaticActorDirectory {
    async fn display_name(&self, id: i64) -> Option<String> {
        self.entries.get(&id).cloned()
    }
}
