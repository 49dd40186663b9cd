//! Wire data models for the hosting API.

mod branches;
mod commits;
pub(crate) mod de;
mod pulls;
mod rate_limit;
mod repos;

pub use branches::{Branch, BranchStatus};
pub use commits::{Commit, CommitFiles, ContributorId, FileChange, FileStatus};
pub use pulls::{PullRequest, PullState, Review, ReviewState};
pub use rate_limit::RateLimit;
pub use repos::{Contributor, Repository};
