//! Data models for the application.
//!
//! These models represent the build records fetched from the buildserver
//! and the pagination state a view keeps over them.
//!
//! Records derive Serialize/Deserialize for the HTTP payload and the JSON
//! output mode.

pub mod build;
pub mod pagination;

// Re-exports for convenient access
pub use build::Build;
pub use pagination::{Pagination, RowsPerPage};
