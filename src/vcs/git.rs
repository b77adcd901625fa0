//! `git` subprocess runner.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Error, Result};
use crate::vcs::VersionControl;

/// Runs `git` inside the project checkout.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Create a runner rooted at `root`, checking that it is a work tree.
    pub fn open(root: &Path) -> Result<Self> {
        let git = Self {
            root: root.to_path_buf(),
        };
        git.run(&["rev-parse", "--git-dir"]).map_err(|_| Error::Vcs {
            command: "git rev-parse".to_string(),
            message: format!("{} is not a git repository", root.display()),
        })?;
        Ok(git)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!("git {}", args.join(" "));
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| Error::Vcs {
                command: command_label(args),
                message: if e.kind() == std::io::ErrorKind::NotFound {
                    "git is not installed".to_string()
                } else {
                    e.to_string()
                },
            })
    }

    /// Run a command and return trimmed stdout; non-zero exit is an error.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(Error::Vcs {
                command: command_label(args),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Whether the work tree has no uncommitted changes.
    pub fn is_clean(&self) -> Result<bool> {
        Ok(self.run(&["status", "--porcelain"])?.is_empty())
    }
}

/// Short command name for error messages, without free-form arguments.
fn command_label(args: &[&str]) -> String {
    match args.first() {
        Some(sub) => format!("git {}", sub),
        None => "git".to_string(),
    }
}

impl VersionControl for GitCli {
    fn current_branch(&self) -> Result<String> {
        self.run(&["branch", "--show-current"])
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/heads/{}", name);
        Ok(self
            .output(&["show-ref", "--verify", "--quiet", &reference])?
            .status
            .success())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        if self.branch_exists(name)? {
            return Err(Error::Vcs {
                command: "git checkout".to_string(),
                message: format!("branch {} already exists", name),
            });
        }
        self.run(&["checkout", "-b", name])?;
        tracing::info!("Created branch {}", name);
        Ok(())
    }

    fn switch_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", name])?;
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.run(&["branch", "-D", name])?;
        tracing::info!("Deleted branch {}", name);
        Ok(())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        for path in paths {
            self.run(&["add", "--", path])?;
        }
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "-u", remote, branch])?;
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let key = format!("remote.{}.url", remote);
        let output = self.output(&["config", "--get", &key])?;
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((output.status.success() && !url.is_empty()).then_some(url))
    }
}
