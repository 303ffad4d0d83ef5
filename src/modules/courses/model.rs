//! Course data models and DTOs.
//!
//! Re-exports course models from the `coursehub-models` crate.

pub use coursehub_models::courses::*;
pub use coursehub_models::ids::CourseId;
