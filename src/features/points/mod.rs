//! Point-of-interest records: the data model, the store contract with its
//! PostgreSQL and in-memory implementations, and the form validator that
//! gates every write.

pub mod dtos;
pub mod models;
pub mod services;

pub use services::{InMemoryPointStore, PgPointStore, PointStore};
