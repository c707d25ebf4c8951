//! Gist revision history.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::GistUser;

/// One revision in a gist's history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GistCommit {
    /// The revision hash.
    pub version: String,

    /// API URL for the gist at this revision.
    pub url: String,

    /// The committer. Anonymous revisions have none.
    #[serde(default)]
    pub user: Option<GistUser>,

    /// Line change counts for the revision.
    #[serde(default)]
    pub change_status: ChangeStatus,

    /// When the revision was committed.
    pub committed_at: DateTime<Utc>,
}

/// Line change counts for a revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeStatus {
    /// Total lines changed
    #[serde(default)]
    pub total: Option<u64>,
    /// Lines added
    #[serde(default)]
    pub additions: Option<u64>,
    /// Lines deleted
    #[serde(default)]
    pub deletions: Option<u64>,
}
