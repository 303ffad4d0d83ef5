//! # Coursehub CLI
//!
//! Administrative and seeding utilities used by the `coursehub-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use coursehub_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10, 50); // 10 courses, 50 students
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
