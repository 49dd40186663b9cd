//! Branch data model and derived status.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// Age in days beyond which a branch tip counts as stale.
const STALE_AFTER_DAYS: i64 = 90;

/// A branch as returned by the branch-list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Branch name, unique within the repository
    pub name: String,
    /// Sha of the tip commit
    pub commit_sha: String,
    /// Author timestamp of the tip commit; lenient
    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub committed_at: Option<DateTime<Utc>>,
    /// Author of the tip commit
    pub author: String,
    /// Message of the tip commit
    pub message: String,
    /// Whether this is the repository's default branch
    #[serde(default)]
    pub default: bool,
}

impl Branch {
    /// Derive the display status for this branch.
    ///
    /// Upstream does not store a status; see [`BranchStatus::derive`].
    #[must_use]
    pub fn status(&self, default_branch_shas: &HashSet<String>, now: DateTime<Utc>) -> BranchStatus {
        BranchStatus::derive(self, default_branch_shas, now)
    }
}

/// Derived branch status for the branch panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BranchStatus {
    Active,
    Stale,
    Merged,
}

impl BranchStatus {
    /// Classify a branch from its tip recency and the fetched
    /// default-branch commit set.
    ///
    /// The default branch is always `Active`. A non-default branch whose
    /// tip sha appears among the default branch's commits is `Merged`.
    /// Otherwise the tip's age decides: within 90 days `Active`, older
    /// (or unknown) `Stale`.
    #[must_use]
    pub fn derive(
        branch: &Branch,
        default_branch_shas: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Self {
        if branch.default {
            return Self::Active;
        }
        if default_branch_shas.contains(&branch.commit_sha) {
            return Self::Merged;
        }
        match branch.committed_at {
            Some(at) if now.signed_duration_since(at) <= Duration::days(STALE_AFTER_DAYS) => {
                Self::Active
            }
            _ => Self::Stale,
        }
    }
}
