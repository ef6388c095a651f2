//! HTTP API layer for tanihub.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: accounts, projects, phases, products, feed, uploads
//! - **Extractors**: Authentication
//! - **Middleware**: Bearer-token auth
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
