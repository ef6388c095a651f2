//! Core business logic for tanihub.

pub mod services;

pub use services::*;
