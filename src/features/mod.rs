pub mod admin;
pub mod auth;
pub mod embed;
pub mod points;
