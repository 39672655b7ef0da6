//! Build record model.

use serde::{Deserialize, Serialize};

/// One row of build metadata returned by the buildserver API.
///
/// Records are read-only: they are created by the fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Unique identifier within a fetched collection.
    pub build_id: i64,

    /// Source repository location.
    pub git_repository_url: String,

    /// Commit identifier.
    pub commit_hash: String,

    /// Free-form status label (e.g. `pending`, `success`).
    pub build_status: String,
}

impl Build {
    /// The three displayed cells, in column order: repository, commit, status.
    pub fn cells(&self) -> [&str; 3] {
        [
            &self.git_repository_url,
            &self.commit_hash,
            &self.build_status,
        ]
    }
}
