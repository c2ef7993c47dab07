use crate::features::auth::model::Actor;

/// Answers the host's `can_manage` question for the admin screens.
pub trait PermissionChecker: Send + Sync {
    fn can_manage(&self, actor: &Actor) -> bool;
}

/// Grants management to actors carrying a single configured role.
pub struct RolePermissionChecker {
    required_role: String,
}

impl RolePermissionChecker {
    pub fn new(required_role: impl Into<String>) -> Self {
        Self {
            required_role: required_role.into(),
        }
    }
}

impl PermissionChecker for RolePermissionChecker {
    fn can_manage(&self, actor: &Actor) -> bool {
        actor.has_role(&self.required_role)
    }
}
