//! Student data models and DTOs.
//!
//! Re-exports student models from the `coursehub-models` crate.

pub use coursehub_models::ids::StudentId;
pub use coursehub_models::students::*;
