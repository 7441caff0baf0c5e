//! Database models for BukuToko
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub use shared::models::*;
pub use shared::types::Owner;
