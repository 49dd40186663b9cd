//! Pull request and review data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PullState {
    Open,
    Closed,
    Merged,
}

/// Pull request information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Number, unique within the repository
    pub number: u64,
    /// Title
    pub title: String,
    /// Raw upstream state; see [`PullRequest::effective_state`]
    pub state: PullState,
    /// When the PR was opened
    pub created_at: DateTime<Utc>,
    /// When the PR was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,
    /// When the PR was closed, if it was
    pub closed_at: Option<DateTime<Utc>>,
    /// Author handle
    pub author: String,
    /// Lines added across the PR
    pub additions: u32,
    /// Lines deleted across the PR
    pub deletions: u32,
    /// Label names
    #[serde(default)]
    pub labels: Vec<String>,
    /// Whether the PR is a draft
    #[serde(default)]
    pub draft: bool,
}

impl PullRequest {
    /// State with the merged refinement applied.
    ///
    /// Upstream reports merged PRs with raw state `closed`; a PR with
    /// `merged_at` set is `Merged` regardless of the raw state.
    #[must_use]
    pub fn effective_state(&self) -> PullState {
        if self.merged_at.is_some() {
            PullState::Merged
        } else {
            self.state
        }
    }

    /// Whether the PR was closed without being merged.
    #[must_use]
    pub fn closed_without_merge(&self) -> bool {
        self.closed_at.is_some() && self.merged_at.is_none()
    }
}

/// Review verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
}

/// A review submitted on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Number of the pull request reviewed
    pub pull_number: u64,
    /// Reviewer handle
    pub reviewer: String,
    /// Verdict
    pub state: ReviewState,
    /// When the review was submitted
    pub submitted_at: DateTime<Utc>,
}
