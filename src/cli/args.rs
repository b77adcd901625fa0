//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, RunMode, DEFAULT_CONFIG_FILE};

/// Course material upload CLI.
#[derive(Parser, Debug)]
#[command(
    name = "share-upload",
    version,
    about = "Add staged course materials to the site and open a pull request",
    long_about = "Scans the staging directory, asks for the course, material type and filename of each file,\n\
                  copies it into the resource tree, lists it on the course page and publishes the\n\
                  result as a branch and pull request."
)]
pub struct Args {
    /// Project root (the site checkout).
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Path to configuration file, relative to the project root.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Staging directory, relative to the project root.
    #[arg(short = 'u', long = "upload-dir")]
    pub upload_dir: Option<PathBuf>,

    /// Run mode.
    #[arg(long, value_enum)]
    pub mode: Option<RunModeArg>,

    /// Only update the site tree; no branch, commit or pull request.
    #[arg(long)]
    pub skip_git: bool,

    /// Remote to push to.
    #[arg(long, env = "SHARE_UPLOAD_REMOTE")]
    pub remote: Option<String>,

    /// Base branch of the pull request.
    #[arg(long)]
    pub base: Option<String>,

    /// Delete processed staging files without asking.
    #[arg(long)]
    pub delete_processed: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI run mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RunModeArg {
    /// Classify and publish staged files.
    Interactive,
    /// Print the hints inferred for each staged file and exit.
    Inspect,
}

impl From<RunModeArg> for RunMode {
    fn from(arg: RunModeArg) -> Self {
        match arg {
            RunModeArg::Interactive => RunMode::Interactive,
            RunModeArg::Inspect => RunMode::Inspect,
        }
    }
}

impl Args {
    /// Configuration file location, resolved against the project root.
    pub fn config_path(&self) -> PathBuf {
        if self.config.is_absolute() {
            self.config.clone()
        } else {
            self.root.join(&self.config)
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        config.project_root = self.root;

        if let Some(dir) = self.upload_dir {
            config.paths.upload_dir = dir;
        }

        if let Some(mode) = self.mode {
            config.options.mode = mode.into();
        }

        if let Some(remote) = self.remote {
            config.git.remote = remote;
        }

        if let Some(base) = self.base {
            config.git.base_branch = base;
        }

        // Boolean flags (only override if set to non-default)
        if self.skip_git {
            config.options.skip_git = true;
        }

        if self.delete_processed {
            config.options.delete_processed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides() {
        let args = Args::parse_from([
            "share-upload",
            "--root",
            "/site",
            "--upload-dir",
            "inbox",
            "--mode",
            "inspect",
            "--base",
            "main",
            "--skip-git",
        ]);
        assert_eq!(args.config_path(), PathBuf::from("/site").join(DEFAULT_CONFIG_FILE));

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.project_root, PathBuf::from("/site"));
        assert_eq!(config.upload_dir(), PathBuf::from("/site/inbox"));
        assert_eq!(config.options.mode, RunMode::Inspect);
        assert_eq!(config.git.base_branch, "main");
        assert_eq!(config.git.remote, "origin");
        assert!(config.options.skip_git);
        assert!(!config.options.delete_processed);
    }

    #[test]
    fn test_defaults_keep_config() {
        let args = Args::parse_from(["share-upload"]);
        let mut config = Config::default();
        config.options.skip_git = true;
        args.merge_into_config(&mut config);

        assert!(config.options.skip_git);
        assert_eq!(config.options.mode, RunMode::Interactive);
    }
}
