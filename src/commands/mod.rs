//! User command handlers.
//!
//! This module contains the commands a user can issue against a view:
//! - `pagination`: page navigation and page size selection

pub mod pagination;

pub use pagination::{apply_command, CommandOutcome, ViewCommand, HELP_TEXT};
