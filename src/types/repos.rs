//! Repository and contributor data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository metadata for the overview panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Owner handle
    pub owner: String,
    /// Description, if set
    pub description: Option<String>,
    /// Name of the default branch
    pub default_branch: String,
    /// Star count
    #[serde(default)]
    pub stars: u32,
    /// Fork count
    #[serde(default)]
    pub forks: u32,
    /// Open issue count
    #[serde(default)]
    pub open_issues: u32,
    /// Primary language, if detected
    pub language: Option<String>,
    /// When the repository was created
    pub created_at: DateTime<Utc>,
    /// When the repository last received a push
    pub pushed_at: Option<DateTime<Utc>>,
}

/// A contributor as returned by the contributors endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    /// Account handle
    pub login: String,
    /// Total contribution count reported by upstream
    pub contributions: u32,
    /// Avatar image URL, if any
    pub avatar_url: Option<String>,
}
