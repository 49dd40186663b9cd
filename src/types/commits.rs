//! Commit and file-change data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// A single commit as returned by the commit-list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Unique commit id
    pub sha: String,
    /// Account handle of the author, absent for unlinked commits
    pub author_login: Option<String>,
    /// Free-text author name from the commit metadata
    pub author_name: String,
    /// Author timestamp; `None` when upstream sent a malformed date
    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Commit message
    pub message: String,
}

impl Commit {
    /// Contributor identity for aggregation grouping.
    ///
    /// Prefers the stable account handle; falls back to the free-text name
    /// when no handle is linked. Two commits from the same person under
    /// different raw name spellings are therefore NOT merged; that is the
    /// documented contract, not an accident.
    #[must_use]
    pub fn contributor(&self) -> ContributorId {
        match &self.author_login {
            Some(login) => ContributorId::Handle(login.clone()),
            None => ContributorId::DisplayName(self.author_name.clone()),
        }
    }
}

/// Tagged contributor identity.
///
/// Aggregations group strictly by this value's equality, so a `Handle` and
/// a `DisplayName` carrying the same text remain distinct contributors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ContributorId {
    /// Stable account handle
    Handle(String),
    /// Free-text author name, used when no handle is linked
    DisplayName(String),
}

impl ContributorId {
    /// The underlying name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Handle(s) | Self::DisplayName(s) => s,
        }
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one file within a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
}

/// One file touched by a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Path of the file within the repository
    pub filename: String,
    /// What happened to the file in this commit
    pub status: FileStatus,
    /// Total changed lines
    pub changes: u32,
    /// Lines added
    pub additions: u32,
    /// Lines deleted
    pub deletions: u32,
}

/// Per-commit file detail as returned by the commit-detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitFiles {
    /// Commit id the files belong to
    pub sha: String,
    /// Author timestamp of the commit; lenient like [`Commit::timestamp`]
    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Files touched by the commit
    #[serde(default)]
    pub files: Vec<FileChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_deserialize() {
        let json = r#"{
            "sha": "abc123",
            "authorLogin": "octocat",
            "authorName": "The Octocat",
            "timestamp": "2024-01-15T10:30:00Z",
            "message": "Fix pagination"
        }"#;

        let commit: Commit = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(commit.sha, "abc123");
        assert!(commit.timestamp.is_some());
        assert_eq!(
            commit.contributor(),
            ContributorId::Handle("octocat".to_string())
        );
    }

    #[test]
    fn test_malformed_timestamp_is_detected_not_fatal() {
        let json = r#"{
            "sha": "abc123",
            "authorLogin": null,
            "authorName": "Anonymous",
            "timestamp": "yesterday-ish",
            "message": "???"
        }"#;

        let commit: Commit = serde_json::from_str(json).expect("should deserialize");
        assert!(commit.timestamp.is_none());
        assert_eq!(
            commit.contributor(),
            ContributorId::DisplayName("Anonymous".to_string())
        );
    }

    #[test]
    fn test_handle_and_display_name_never_compare_equal() {
        let handle = ContributorId::Handle("alice".to_string());
        let display = ContributorId::DisplayName("alice".to_string());
        assert_ne!(handle, display);
    }

    #[test]
    fn test_file_change_deserialize() {
        let json = r#"{
            "filename": "src/lib.rs",
            "status": "modified",
            "changes": 12,
            "additions": 8,
            "deletions": 4
        }"#;

        let change: FileChange = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(change.status, FileStatus::Modified);
        assert_eq!(change.changes, 12);
    }
}
