//! Shared types and models for BukuToko
//!
//! This crate holds the domain models, enums, and pure validation rules used
//! by the backend and its test suites. Nothing in here touches the database
//! or the HTTP layer.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
