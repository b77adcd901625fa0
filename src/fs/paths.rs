//! Resource tree placement and staging cleanup.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming::{make_unique_filename, sanitize_filename};
use crate::fs::scan::FileCandidate;

/// Resource folder of a course.
pub fn course_resources_dir(config: &Config, course_name: &str) -> PathBuf {
    config.resources_dir().join(course_name)
}

/// Web path of a file under the public directory, e.g. `/resources/数据结构/a.pdf`.
pub fn public_path(config: &Config, file: &Path) -> Result<String> {
    let relative = file.strip_prefix(config.public_dir()).map_err(|_| {
        Error::Config(format!(
            "{} is outside the public directory {}",
            file.display(),
            config.public_dir().display()
        ))
    })?;

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    Ok(format!("/{}", segments.join("/")))
}

/// Path of a public web path relative to the project root, for staging in git.
pub fn repo_path_of_public(config: &Config, web_path: &str) -> String {
    let public = config.paths.public_dir.to_string_lossy().replace('\\', "/");
    format!(
        "{}/{}",
        public.trim_end_matches('/'),
        web_path.trim_start_matches('/')
    )
}

/// Copy a staged file into the course's resource folder.
///
/// Existing files are never overwritten; a numeric suffix is added instead.
/// Returns the web path to reference from the course page.
pub fn copy_to_resources(
    config: &Config,
    candidate: &FileCandidate,
    course_name: &str,
    filename: &str,
) -> Result<String> {
    let course_folder = sanitize_filename(course_name)?;
    let filename = sanitize_filename(filename)?;

    let target_dir = course_resources_dir(config, &course_folder);
    std::fs::create_dir_all(&target_dir)?;

    let target = make_unique_filename(&target_dir.join(&filename))?;
    std::fs::copy(&candidate.path, &target)?;
    tracing::info!("Copied {} -> {}", candidate.path.display(), target.display());

    public_path(config, &target)
}

/// Delete a processed staging file, and its folder once empty.
///
/// The staging root itself is never removed.
pub fn remove_candidate(candidate: &FileCandidate, staging_root: &Path) -> Result<()> {
    std::fs::remove_file(&candidate.path)?;

    if let Some(parent) = candidate.path.parent() {
        if parent != staging_root && std::fs::read_dir(parent)?.next().is_none() {
            std::fs::remove_dir(parent)?;
        }
    }

    Ok(())
}
