//! Staging directory scanning and file validation.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::config::LimitsConfig;
use crate::error::Result;
use crate::fs::naming::split_extension;
use crate::hints::{self, Hints};

/// Group name for files without a course hint.
pub const UNSORTED_GROUP: &str = "未分类";

/// A staged file awaiting classification.
///
/// Size and relative path are captured at discovery and never updated.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Absolute (or root-joined) path of the staged file.
    pub path: PathBuf,

    /// File name including extension.
    pub name: String,

    /// Size in bytes at scan time.
    pub size: u64,

    /// Path relative to the staging root.
    pub relative_path: PathBuf,

    /// Hints derived from the name and staging subdirectory.
    pub hints: Hints,
}

/// Why a staged file cannot be processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("File no longer exists")]
    Missing,

    #[error("File too large ({size}), must be smaller than {limit}")]
    TooLarge { size: String, limit: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl FileCandidate {
    /// Describe a file found under `staging_root`.
    pub fn from_path(path: &Path, staging_root: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let relative_path = path
            .strip_prefix(staging_root)
            .unwrap_or(path)
            .to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let hints = hints::extract(&name, course_dir_of(&relative_path).as_deref());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size,
            relative_path,
            hints,
        })
    }

    /// Top-level staging subdirectory holding this file, if any.
    pub fn course_dir(&self) -> Option<String> {
        course_dir_of(&self.relative_path)
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        split_extension(&self.name).1.map(|e| e.to_lowercase())
    }

    /// Human readable size, e.g. `1.5MB`.
    pub fn human_size(&self) -> String {
        format_size(self.size)
    }

    /// One-line description used in listings and selection prompts.
    pub fn display_label(&self) -> String {
        let mut parts = Vec::new();

        if let Some(course) = &self.hints.course {
            parts.push(format!("课程:{}", course));
        }
        if let Some(year) = &self.hints.year {
            parts.push(format!("{}年", year));
        }
        if let Some(category) = &self.hints.category {
            parts.push(category.label().to_string());
        }

        let hint = if parts.is_empty() {
            UNSORTED_HINT.to_string()
        } else {
            parts.join(" | ")
        };

        format!("{} ({}) [{}]", self.name, self.human_size(), hint)
    }
}

const UNSORTED_HINT: &str = "待分类";

fn course_dir_of(relative_path: &Path) -> Option<String> {
    let components: Vec<_> = relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if components.len() > 1 {
        components.into_iter().next()
    } else {
        None
    }
}

/// Format a byte count with one decimal and a binary unit.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1}TB", size)
}

/// Check a candidate against the configured limits.
pub fn validate(
    candidate: &FileCandidate,
    limits: &LimitsConfig,
) -> std::result::Result<(), Rejection> {
    if !candidate.path.exists() {
        return Err(Rejection::Missing);
    }

    if candidate.size >= limits.max_file_size {
        return Err(Rejection::TooLarge {
            size: candidate.human_size(),
            limit: format_size(limits.max_file_size),
        });
    }

    let supported = candidate.extension().is_some_and(|ext| {
        limits
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
    });
    if !supported {
        return Err(Rejection::UnsupportedFormat(
            candidate
                .extension()
                .map(|e| format!(".{}", e))
                .unwrap_or_else(|| "(no extension)".to_string()),
        ));
    }

    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Recursively collect every non-hidden, non-ignored file under `root`.
pub fn scan_staging_dir(root: &Path, ignored: &[String]) -> Result<Vec<FileCandidate>> {
    if !root.exists() {
        tracing::warn!("Staging directory does not exist: {}", root.display());
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if ignored.iter().any(|i| i.as_str() == name) {
            tracing::debug!("Ignoring bookkeeping file {}", entry.path().display());
            continue;
        }

        candidates.push(FileCandidate::from_path(entry.path(), root)?);
    }

    tracing::debug!("Found {} staged files in {}", candidates.len(), root.display());
    Ok(candidates)
}

/// Group candidates by course hint; unhinted files go to [`UNSORTED_GROUP`].
pub fn group_by_course(candidates: &[FileCandidate]) -> BTreeMap<String, Vec<&FileCandidate>> {
    let mut groups: BTreeMap<String, Vec<&FileCandidate>> = BTreeMap::new();
    for candidate in candidates {
        let key = candidate
            .hints
            .course
            .clone()
            .unwrap_or_else(|| UNSORTED_GROUP.to_string());
        groups.entry(key).or_default().push(candidate);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::MaterialCategory;
    use std::fs;

    fn stage(root: &Path, relative: &str, bytes: usize) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, vec![b'x'; bytes]).unwrap();
        path
    }

    #[test]
    fn test_scan_skips_hidden_and_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        stage(root, "2024-期末-数据结构-试卷.pdf", 10);
        stage(root, "操作系统/notes.pdf", 5);
        stage(root, ".DS_Store", 1);
        stage(root, ".hidden/secret.pdf", 1);
        stage(root, "README.md", 1);
        stage(root, ".gitkeep", 0);

        let ignored = LimitsConfig::default().ignored_files;
        let found = scan_staging_dir(root, &ignored).unwrap();
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["2024-期末-数据结构-试卷.pdf", "notes.pdf"]);
        assert_eq!(found[0].size, 10);
        assert_eq!(found[1].relative_path, PathBuf::from("操作系统/notes.pdf"));
    }

    #[test]
    fn test_subdirectory_sets_course_hint() {
        let dir = tempfile::tempdir().unwrap();
        let path = stage(dir.path(), "编译原理/2024-期末-数据结构-试卷.pdf", 3);
        let candidate = FileCandidate::from_path(&path, dir.path()).unwrap();

        assert_eq!(candidate.course_dir().as_deref(), Some("编译原理"));
        assert_eq!(candidate.hints.course.as_deref(), Some("编译原理"));
        assert_eq!(candidate.hints.category, Some(MaterialCategory::FinalExam));
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let found = scan_staging_dir(&dir.path().join("upload"), &[]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let limits = LimitsConfig {
            max_file_size: 8,
            ..LimitsConfig::default()
        };

        let ok = FileCandidate::from_path(&stage(dir.path(), "a.PDF", 7), dir.path()).unwrap();
        assert_eq!(validate(&ok, &limits), Ok(()));

        let big = FileCandidate::from_path(&stage(dir.path(), "b.pdf", 8), dir.path()).unwrap();
        assert!(matches!(validate(&big, &limits), Err(Rejection::TooLarge { .. })));

        let exe = FileCandidate::from_path(&stage(dir.path(), "c.exe", 1), dir.path()).unwrap();
        assert_eq!(
            validate(&exe, &limits),
            Err(Rejection::UnsupportedFormat(".exe".to_string()))
        );

        let bare = FileCandidate::from_path(&stage(dir.path(), "Makefile", 1), dir.path()).unwrap();
        assert!(matches!(
            validate(&bare, &limits),
            Err(Rejection::UnsupportedFormat(_))
        ));

        fs::remove_file(&ok.path).unwrap();
        assert_eq!(validate(&ok, &limits), Err(Rejection::Missing));
    }

    #[test]
    fn test_rejection_messages() {
        let reason = Rejection::UnsupportedFormat(".exe".to_string()).to_string();
        assert_eq!(reason, "Unsupported file format: .exe");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.0B");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(100 * 1024 * 1024), "100.0MB");
    }

    #[test]
    fn test_display_label() {
        let dir = tempfile::tempdir().unwrap();
        let c = FileCandidate::from_path(&stage(dir.path(), "2024-期末-数据结构-试卷.pdf", 2048), dir.path())
            .unwrap();
        assert_eq!(
            c.display_label(),
            "2024-期末-数据结构-试卷.pdf (2.0KB) [课程:数据结构 | 2024年 | 期末考试]"
        );

        let plain = FileCandidate::from_path(&stage(dir.path(), "0001.pdf", 1), dir.path()).unwrap();
        assert!(plain.display_label().ends_with("[待分类]"));
    }

    #[test]
    fn test_group_by_course() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileCandidate::from_path(&stage(dir.path(), "数据结构-复习.pdf", 1), dir.path()).unwrap();
        let b = FileCandidate::from_path(&stage(dir.path(), "0001.pdf", 1), dir.path()).unwrap();
        let candidates = vec![a, b];
        let groups = group_by_course(&candidates);

        assert_eq!(groups["数据结构"].len(), 1);
        assert_eq!(groups[UNSORTED_GROUP][0].name, "0001.pdf");
    }
}
