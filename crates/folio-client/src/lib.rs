//! # Folio Client
//!
//! One helper per blog endpoint. Every call either returns the decoded
//! payload or a [`ClientError`] saying why it failed.

mod client;
mod error;

pub use client::{BlogClient, BlogPage};
pub use error::ClientError;
