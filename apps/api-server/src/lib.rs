//! # Folio API Server
//!
//! Blog CRUD over actix-web. The binary in `main.rs` wires these modules
//! into an `HttpServer`; integration tests and the client crate build the
//! same app in-process.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
