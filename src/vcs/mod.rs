//! Version control module.
//!
//! Handles:
//! - Branch, stage, commit and push through `git`
//! - Pull request creation through the GitHub CLI
//! - Branch names, commit messages and pull request text
//! - Remote URL parsing and manual pull request links

pub mod git;
pub mod github;
pub mod pr;
pub mod remote;

pub use git::GitCli;
pub use github::GhCli;
pub use pr::{branch_name, commit_message, pr_body, pr_title, PrFile};
pub use remote::{compare_url, manual_pr_url, parse_remote, RepoSlug};

use crate::error::Result;

/// Working tree operations the publish step relies on.
pub trait VersionControl {
    fn current_branch(&self) -> Result<String>;

    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Create `name` and switch to it. Fails if the branch already exists.
    fn create_branch(&self, name: &str) -> Result<()>;

    fn switch_branch(&self, name: &str) -> Result<()>;

    fn delete_branch(&self, name: &str) -> Result<()>;

    /// Stage paths relative to the project root.
    fn stage(&self, paths: &[String]) -> Result<()>;

    fn commit(&self, message: &str) -> Result<()>;

    fn push(&self, remote: &str, branch: &str) -> Result<()>;

    /// URL of `remote`, or None when it is not configured.
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}

/// A pull request ready to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub title: String,
    pub body: String,
    pub branch: String,
    pub base: String,
    /// Repository to open the request against (`owner/name`); None means the current one.
    pub repo: Option<String>,
}

/// Hosting service that opens pull requests.
pub trait PullRequestHost {
    /// Whether the host tooling is installed and authenticated.
    fn check_ready(&self) -> Result<()>;

    fn is_fork(&self) -> Result<bool>;

    /// `owner/name` of the parent repository when the checkout is a fork.
    fn upstream_repo(&self) -> Result<Option<String>>;

    /// Open the pull request and return its URL.
    fn create_pull_request(&self, request: &PullRequest) -> Result<String>;
}
