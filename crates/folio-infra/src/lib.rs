//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL blog store via SeaORM
//!
//! The in-memory store is always available.

pub mod database;

pub use database::InMemoryBlogRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections, PostgresBlogRepository};
