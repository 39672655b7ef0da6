//! Business logic services.
//!
//! This module contains the buildserver API client and the build list
//! view that fetches through it.
//!
//! Services are independent of the terminal front end.

pub mod build_list;
pub mod builds_client;

pub use build_list::{BuildListView, PageView};
pub use builds_client::{BuildsClient, BuildsClientConfig};
