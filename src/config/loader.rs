//! Configuration structures and loading logic.

use crate::config::modes::RunMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration filename, looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "share-upload.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site checkout all relative paths are resolved against.
    #[serde(skip)]
    pub project_root: PathBuf,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Site layout, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Staging directory scanned for new materials.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Directory holding one page per course.
    #[serde(default = "default_courses_dir")]
    pub courses_dir: PathBuf,

    /// Web root; stored download paths are relative to it.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Per-course resource folders live here.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    /// Course registry mapping page keys to display names.
    #[serde(default = "default_meta_file")]
    pub meta_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            courses_dir: default_courses_dir(),
            public_dir: default_public_dir(),
            resources_dir: default_resources_dir(),
            meta_file: default_meta_file(),
        }
    }
}

/// Limits applied before a staged file is offered for processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Files must be strictly smaller than this many bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Accepted extensions, compared case-insensitively, without the dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Bookkeeping files in the staging directory that are never picked up.
    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
            ignored_files: default_ignored_files(),
        }
    }
}

/// Version control settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Remote that branches are pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch pull requests are opened against.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Prefix of generated branch names.
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            base_branch: default_base_branch(),
            branch_prefix: default_branch_prefix(),
        }
    }
}

/// Behaviour switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Run mode (interactive, inspect).
    #[serde(default)]
    pub mode: RunMode,

    /// Stop after updating the site tree; no branch, commit or pull request.
    #[serde(default)]
    pub skip_git: bool,

    /// Delete processed staging files without asking.
    #[serde(default)]
    pub delete_processed: bool,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("upload")
}

fn default_courses_dir() -> PathBuf {
    PathBuf::from("pages/courses")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("public/resources")
}

fn default_meta_file() -> PathBuf {
    PathBuf::from("pages/courses/_meta.ts")
}

fn default_max_file_size() -> u64 {
    100 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    [
        "pdf", "docx", "doc", "pptx", "ppt", "zip", "rar", "7z", "md", "txt", "xlsx", "xls", "png",
        "jpg", "jpeg",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ignored_files() -> Vec<String> {
    vec!["README.md".to_string(), ".gitkeep".to_string()]
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_base_branch() -> String {
    "master".to_string()
}

fn default_branch_prefix() -> String {
    "add".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults rooted at the given project directory.
    pub fn with_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.project_root.join(&self.paths.upload_dir)
    }

    pub fn courses_dir(&self) -> PathBuf {
        self.project_root.join(&self.paths.courses_dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.project_root.join(&self.paths.public_dir)
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.project_root.join(&self.paths.resources_dir)
    }

    pub fn meta_file(&self) -> PathBuf {
        self.project_root.join(&self.paths.meta_file)
    }

    /// Course page for a registry key.
    pub fn course_page(&self, course_key: &str) -> PathBuf {
        self.courses_dir().join(format!("{}.mdx", course_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.limits.max_file_size, 100 * 1024 * 1024);
        assert!(config.limits.allowed_extensions.contains(&"7z".to_string()));
        assert_eq!(config.git.base_branch, "master");
        assert_eq!(config.options.mode, RunMode::Interactive);
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            [paths]
            upload_dir = "incoming"

            [git]
            base_branch = "main"

            [options]
            mode = "inspect"
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.upload_dir, PathBuf::from("incoming"));
        assert_eq!(config.paths.courses_dir, PathBuf::from("pages/courses"));
        assert_eq!(config.git.base_branch, "main");
        assert_eq!(config.git.remote, "origin");
        assert_eq!(config.options.mode, RunMode::Inspect);
    }

    #[test]
    fn test_resolved_paths() {
        let config = Config::with_root("/site");
        assert_eq!(config.upload_dir(), PathBuf::from("/site/upload"));
        assert_eq!(
            config.course_page("shujujiegou"),
            PathBuf::from("/site/pages/courses/shujujiegou.mdx")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
