//! # Folio Core
//!
//! The domain layer of the Folio blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the blog entity, slug and read-time derivation, validation, list filters
//! and the repository port.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{RepoError, ValidationErrors};
