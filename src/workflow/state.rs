//! Session state: the files processed so far in this run.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::fs::repo_path_of_public;
use crate::hints::MaterialCategory;
use crate::vcs::PrFile;

/// A staged file that was copied into the site and listed on its course page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedEntry {
    /// Display name of the course.
    pub course_name: String,
    /// Page key of the course.
    pub course_key: String,
    /// Final filename in the resource folder.
    pub filename: String,
    /// Web path referenced from the course page.
    pub public_path: String,
    pub category: MaterialCategory,
    /// Where the file was staged.
    pub source: PathBuf,
}

/// Accumulated results of one run.
#[derive(Debug, Clone, Default)]
pub struct Session {
    processed: Vec<ProcessedEntry>,
}

fn repo_relative(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ProcessedEntry) {
        tracing::debug!("Recorded {} for {}", entry.public_path, entry.course_name);
        self.processed.push(entry);
    }

    pub fn entries(&self) -> &[ProcessedEntry] {
        &self.processed
    }

    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }

    /// Course names in order of first appearance.
    pub fn courses(&self) -> Vec<String> {
        let mut courses: Vec<String> = Vec::new();
        for entry in &self.processed {
            if !courses.contains(&entry.course_name) {
                courses.push(entry.course_name.clone());
            }
        }
        courses
    }

    /// Entries grouped by course, in order of first appearance.
    pub fn by_course(&self) -> Vec<(String, Vec<&ProcessedEntry>)> {
        let mut groups: Vec<(String, Vec<&ProcessedEntry>)> = Vec::new();
        for entry in &self.processed {
            match groups.iter_mut().find(|(name, _)| *name == entry.course_name) {
                Some((_, list)) => list.push(entry),
                None => groups.push((entry.course_name.clone(), vec![entry])),
            }
        }
        groups
    }

    /// Paths to stage, relative to the project root: resources, touched pages
    /// and the course registry when it exists.
    pub fn files_to_stage(&self, config: &Config) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        let mut push = |path: String| {
            if !files.contains(&path) {
                files.push(path);
            }
        };

        for entry in &self.processed {
            push(repo_path_of_public(config, &entry.public_path));
        }
        for entry in &self.processed {
            let page = config
                .paths
                .courses_dir
                .join(format!("{}.mdx", entry.course_key));
            push(repo_relative(&page));
        }
        if config.meta_file().exists() {
            push(repo_relative(&config.paths.meta_file));
        }

        files
    }

    /// Rows for the pull request body.
    pub fn pr_files(&self) -> Vec<PrFile> {
        self.processed
            .iter()
            .map(|e| PrFile {
                course: e.course_name.clone(),
                filename: e.filename.clone(),
                category: e.category.label().to_string(),
            })
            .collect()
    }
}
