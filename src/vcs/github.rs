//! GitHub CLI (`gh`) pull request host.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::vcs::{PullRequest, PullRequestHost};

/// Subset of `gh repo view --json isFork,parent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
    #[serde(default)]
    is_fork: bool,
    #[serde(default)]
    parent: Option<ParentRepo>,
}

#[derive(Debug, Deserialize)]
struct ParentRepo {
    name: String,
    owner: RepoOwner,
}

#[derive(Debug, Deserialize)]
struct RepoOwner {
    login: String,
}

/// Opens pull requests with the GitHub CLI.
#[derive(Debug, Clone)]
pub struct GhCli {
    root: PathBuf,
}

impl GhCli {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("gh {}", args.first().copied().unwrap_or_default());
        let output = Command::new("gh")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::PullRequest(
                        "GitHub CLI (gh) is not installed, see https://cli.github.com/".into(),
                    )
                } else {
                    Error::PullRequest(format!("Failed to run gh: {}", e))
                }
            })?;

        if !output.status.success() {
            return Err(Error::Vcs {
                command: format!("gh {}", args.first().copied().unwrap_or_default()),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn repo_view(&self) -> Result<RepoView> {
        let json = self.run(&["repo", "view", "--json", "isFork,parent"])?;
        parse_repo_view(&json)
    }
}

fn parse_repo_view(json: &str) -> Result<RepoView> {
    Ok(serde_json::from_str(json)?)
}

/// The URL `gh pr create` prints on its last output line.
fn extract_pr_url(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| l.starts_with("http"))
        .map(str::to_string)
}

impl PullRequestHost for GhCli {
    fn check_ready(&self) -> Result<()> {
        self.run(&["--version"])?;
        self.run(&["auth", "status"]).map_err(|_| {
            Error::PullRequest("GitHub CLI is not authenticated, run: gh auth login".into())
        })?;
        Ok(())
    }

    fn is_fork(&self) -> Result<bool> {
        Ok(self.repo_view()?.is_fork)
    }

    fn upstream_repo(&self) -> Result<Option<String>> {
        let view = self.repo_view()?;
        Ok(view
            .parent
            .map(|p| format!("{}/{}", p.owner.login, p.name)))
    }

    fn create_pull_request(&self, request: &PullRequest) -> Result<String> {
        let mut args = vec![
            "pr",
            "create",
            "--title",
            request.title.as_str(),
            "--body",
            request.body.as_str(),
            "--base",
            request.base.as_str(),
        ];
        if let Some(repo) = &request.repo {
            args.extend(["--repo", repo.as_str()]);
        }

        let stdout = self.run(&args)?;
        let url = extract_pr_url(&stdout).ok_or_else(|| {
            Error::PullRequest(format!("gh printed no pull request URL: {}", stdout))
        })?;
        tracing::info!("Pull request created: {}", url);
        Ok(url)
    }
}
