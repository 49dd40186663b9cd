//! Resource clients for the hosting API endpoints.

mod branches;
mod commits;
mod contributors;
mod pulls;
mod repos;

pub use branches::BranchesClient;
pub use commits::CommitsClient;
pub use contributors::ContributorsClient;
pub use pulls::PullsClient;
pub use repos::ReposClient;
