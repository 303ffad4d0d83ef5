//! # Coursehub Core
//!
//! Core types, errors, and utilities for the coursehub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page requests and the paginated list returned by every listing
//! - [`password`]: Password hashing and verification
//! - [`query`]: Search/sort/page specifications handed to repositories
//! - [`serde`]: Query-string friendly deserializers
//!
//! # Example
//!
//! ```ignore
//! use coursehub_core::errors::AppError;
//! use coursehub_core::pagination::{PageRequest, PaginatedList};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//!
//! let page = PageRequest::new(Some(2));
//! let list = PaginatedList::new(items, total, page);
//! assert!(!list.has_previous());
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod query;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{DEFAULT_PAGE_SIZE, PageMeta, PageRequest, PaginatedList};
pub use query::{ListQuery, SortKey};
pub use password::{hash_password, verify_password};
