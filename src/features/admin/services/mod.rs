pub mod admin_service;

pub use admin_service::{AddOutcome, AdminService, EditOutcome};
