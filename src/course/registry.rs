//! Course registry backed by the site's navigation file.
//!
//! The navigation file is a small TypeScript module whose default export maps
//! page keys to labels:
//!
//! ```text
//! export default {
//!   'shujujiegou': '🌲 数据结构',
//!   'xianxingdaishu': '📐 线性代数',
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{is_valid_course_key, Config};
use crate::document::course_page;
use crate::error::{Error, Result};
use crate::fs::sanitize_filename;

static ENTRY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'([^']+)':\s*'([^']*)'").expect("Invalid regex pattern"));

/// Leading emoji or punctuation in front of a course label.
static LABEL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Han}A-Za-z]+").expect("Invalid regex pattern"));

/// A registered course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Page key, also the URL segment.
    pub key: String,
    /// Display name, also the resource folder name.
    pub name: String,
}

/// Result of adding a course to the navigation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaUpdate {
    Added,
    AlreadyPresent,
    /// No navigation file exists; nothing was written.
    Skipped,
}

/// Known courses, in navigation-file order.
#[derive(Debug, Clone, Default)]
pub struct CourseRegistry {
    meta_file: PathBuf,
    courses: Vec<Course>,
}

/// Strip a leading emoji from a navigation label.
pub fn strip_label_prefix(label: &str) -> String {
    LABEL_PREFIX.replace(label.trim(), "").trim().to_string()
}

/// Parse course entries from navigation file content.
pub fn parse_meta(content: &str) -> Vec<Course> {
    ENTRY_LINE
        .captures_iter(content)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().trim().to_string();
            let name = strip_label_prefix(caps.get(2)?.as_str());
            (!name.is_empty()).then_some(Course { key, name })
        })
        .collect()
}

/// Insert `line` before the closing brace of the default export.
///
/// Returns None when no closing brace can be found.
pub fn insert_meta_entry(content: &str, line: &str) -> Option<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    let closing = lines
        .iter()
        .rposition(|l| l.contains('}') && !l.contains("export default"))?;
    if closing == 0 {
        return None;
    }

    let previous = lines[closing - 1].trim_end().to_string();
    if !previous.is_empty() && !previous.ends_with(',') && !previous.ends_with('{') {
        lines[closing - 1] = format!("{},", previous);
    }

    lines.insert(closing, format!("{},", line));
    Some(lines.join("\n"))
}

impl CourseRegistry {
    /// Load the registry. A missing navigation file yields an empty registry.
    pub fn load(meta_file: &Path) -> Result<Self> {
        let courses = match fs::read_to_string(meta_file) {
            Ok(content) => parse_meta(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Course registry not found: {}", meta_file.display());
                Vec::new()
            }
            Err(e) => return Err(Error::Io(e)),
        };

        tracing::info!("Loaded {} courses", courses.len());
        Ok(Self {
            meta_file: meta_file.to_path_buf(),
            courses,
        })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses sorted by display name.
    pub fn courses(&self) -> Vec<&Course> {
        let mut sorted: Vec<&Course> = self.courses.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn get(&self, key: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Find a course by name or key, exact matches first, then containment.
    pub fn match_course(&self, input: &str) -> Option<&Course> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        self.courses
            .iter()
            .find(|c| c.name == input)
            .or_else(|| self.get(input))
            .or_else(|| {
                self.courses
                    .iter()
                    .find(|c| c.name.contains(input) || input.contains(c.name.as_str()))
            })
            .or_else(|| self.courses.iter().find(|c| c.key.contains(input)))
    }

    pub fn page_path(config: &Config, key: &str) -> PathBuf {
        config.course_page(key)
    }

    pub fn resources_path(config: &Config, name: &str) -> PathBuf {
        config.resources_dir().join(name)
    }

    pub fn has_page(&self, config: &Config, course: &Course) -> bool {
        Self::page_path(config, &course.key).exists()
    }

    pub fn has_resources(&self, config: &Config, course: &Course) -> bool {
        Self::resources_path(config, &course.name).is_dir()
    }

    /// Whether both the course page and resource folder exist.
    pub fn is_complete(&self, config: &Config, course: &Course) -> bool {
        self.has_page(config, course) && self.has_resources(config, course)
    }

    /// Create a course: resource folder, page from template, navigation entry.
    pub fn create_course(
        &mut self,
        config: &Config,
        name: &str,
        key: &str,
        emoji: &str,
    ) -> Result<Course> {
        let name = name.trim();
        let key = key.trim();

        if !is_valid_course_key(key) {
            return Err(Error::Registry(format!(
                "Course key '{}' may only contain letters, digits, '-' and '_'",
                key
            )));
        }
        let folder = sanitize_filename(name)?;
        if name.contains('\'') || emoji.contains('\'') {
            return Err(Error::Registry(format!(
                "Course label '{} {}' cannot contain single quotes",
                emoji, name
            )));
        }

        let resources = Self::resources_path(config, &folder);
        fs::create_dir_all(&resources)?;
        tracing::info!("Resource folder ready: {}", resources.display());

        let page = Self::page_path(config, key);
        if page.exists() {
            tracing::info!("Course page already exists: {}", page.display());
        } else {
            if let Some(parent) = page.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&page, course_page(name))?;
            tracing::info!("Created course page: {}", page.display());
        }

        match self.add_to_meta(key, name, emoji)? {
            MetaUpdate::Added => tracing::info!("Added {} {} to navigation", emoji, name),
            MetaUpdate::AlreadyPresent => tracing::info!("Course {} already in navigation", key),
            MetaUpdate::Skipped => {
                tracing::warn!("Navigation file missing, add '{}' manually", key)
            }
        }

        let course = Course {
            key: key.to_string(),
            name: name.to_string(),
        };
        if !self.contains_key(key) {
            self.courses.push(course.clone());
        }
        Ok(course)
    }

    fn add_to_meta(&self, key: &str, name: &str, emoji: &str) -> Result<MetaUpdate> {
        let content = match fs::read_to_string(&self.meta_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(MetaUpdate::Skipped),
            Err(e) => return Err(Error::Io(e)),
        };

        if content.contains(&format!("'{}'", key)) {
            return Ok(MetaUpdate::AlreadyPresent);
        }

        let label = format!("{} {}", emoji.trim(), name).trim().to_string();
        let line = format!("  '{}': '{}'", key, label);
        let updated = insert_meta_entry(&content, &line).ok_or_else(|| {
            Error::Registry(format!(
                "Could not find the closing brace in {}",
                self.meta_file.display()
            ))
        })?;

        fs::write(&self.meta_file, updated)?;
        Ok(MetaUpdate::Added)
    }
}
