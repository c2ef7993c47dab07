//! Host-delegated identity and request-validation concerns.
//!
//! The hosting environment is expected to authenticate admins and forward
//! their identity on each request; this module only consumes that identity
//! (`Actor`), answers the `can_manage` question (`PermissionChecker`), and
//! issues/verifies the anti-forgery tokens embedded in admin forms
//! (`RequestTokenService`). `ActorDirectory` resolves stored actor references
//! back to display names for the attribution columns.

pub mod directory;
pub mod model;
pub mod permissions;
pub mod tokens;

pub use directory::{ActorDirectory, StaticActorDirectory};
pub use model::Actor;
pub use permissions::{PermissionChecker, RolePermissionChecker};
pub use tokens::RequestTokenService;
