//! Line-oriented editing of course pages.
//!
//! A course page is handled as a plain sequence of lines. The only structure
//! the editor relies on is:
//! - section headings (`##`-prefixed lines), one per material category
//! - `---` separators
//! - the trailer marker (the comments widget), which ends insertable content
//!
//! Everything outside the section being edited is left untouched.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::hints::MaterialCategory;

/// Prefix of a section heading line.
pub const HEADING_MARKER: &str = "##";

/// Section separator line.
pub const SEPARATOR: &str = "---";

/// Tag of the comments widget that closes the editable content.
pub const TRAILER_MARKER: &str = "<Comments";

/// Name of the download component emitted for each entry.
pub const ENTRY_COMPONENT: &str = "FileDownload";

static ENTRY_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"path="([^"]+)""#).expect("Invalid regex pattern"));

/// In-memory course page.
#[derive(Debug, Clone)]
pub struct CourseDocument {
    path: PathBuf,
    lines: Vec<String>,
    /// Line terminator of the loaded text, reused on save.
    line_ending: &'static str,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_heading(line: &str) -> bool {
    line.trim().starts_with(HEADING_MARKER)
}

fn is_separator(line: &str) -> bool {
    line.trim() == SEPARATOR
}

fn is_trailer(line: &str) -> bool {
    line.contains(TRAILER_MARKER)
}

fn is_boundary(line: &str) -> bool {
    is_heading(line) || is_separator(line) || is_trailer(line)
}

/// Lines of one download entry block.
pub fn entry_block(display_name: &str, file_path: &str) -> Vec<String> {
    vec![
        format!("<{}", ENTRY_COMPONENT),
        format!("  name=\"{}\"", display_name),
        format!("  path=\"{}\"", file_path),
        "/>".to_string(),
    ]
}

impl CourseDocument {
    /// Load a page from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::DocumentNotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;

        Ok(Self::from_text(path, &content))
    }

    /// Build a document from text without touching the filesystem.
    pub fn from_text(path: impl Into<PathBuf>, content: &str) -> Self {
        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            path: path.into(),
            lines: content
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
            line_ending,
        }
    }

    /// Write the page back to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_text())?;
        tracing::debug!("Saved {} ({} lines)", self.path.display(), self.lines.len());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        self.lines.join(self.line_ending)
    }

    /// Index of the first line starting with `heading` (after trimming).
    pub fn find_section(&self, heading: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.trim().starts_with(heading))
    }

    fn find_trailer(&self) -> Option<usize> {
        self.lines.iter().position(|line| is_trailer(line))
    }

    /// Index of the section heading, creating the section if needed.
    ///
    /// New sections go right before the trailer marker, or at the end of the
    /// document when there is none.
    pub fn ensure_section(&mut self, heading: &str) -> usize {
        if let Some(index) = self.find_section(heading) {
            return index;
        }

        let at = self.find_trailer().unwrap_or(self.lines.len());
        let block = ["", heading, "", SEPARATOR, ""].map(str::to_string);
        self.lines.splice(at..at, block);
        tracing::debug!("Created section '{}' at line {}", heading, at + 1);

        at + 1
    }

    /// First structural boundary after `from`.
    ///
    /// Scans the lines after `from` for a heading, a separator or the trailer
    /// marker. The returned index is moved back over blank lines directly in
    /// front of the boundary, so it points just past the last content line,
    /// but never before `from + 1`.
    pub fn find_next_boundary(&self, from: usize) -> Option<usize> {
        let found = (from + 1..self.lines.len()).find(|&i| is_boundary(&self.lines[i]))?;

        let mut end = found;
        while end > from + 1 && is_blank(&self.lines[end - 1]) {
            end -= 1;
        }
        Some(end)
    }

    /// Where new content of the section headed at `heading_line` goes.
    ///
    /// An empty section closed by a separator receives content after that
    /// separator. An empty section directly followed by another heading or
    /// the trailer receives it right after its own heading.
    fn section_end(&self, heading_line: usize) -> usize {
        let anchor = (heading_line + 1..self.lines.len()).find(|&i| !is_blank(&self.lines[i]));

        match anchor {
            None => self.lines.len(),
            Some(anchor) if is_heading(&self.lines[anchor]) || is_trailer(&self.lines[anchor]) => {
                let mut end = anchor;
                while end > heading_line + 1 && is_blank(&self.lines[end - 1]) {
                    end -= 1;
                }
                end
            }
            Some(anchor) => self
                .find_next_boundary(anchor)
                .unwrap_or(self.lines.len()),
        }
    }

    /// Add a download entry under the section of `category`.
    ///
    /// Returns false (and logs why) when the entry could not be added.
    pub fn add_entry(
        &mut self,
        display_name: &str,
        file_path: &str,
        category: MaterialCategory,
    ) -> bool {
        match self.try_add_entry(display_name, file_path, category) {
            Ok(line) => {
                tracing::debug!(
                    "Added '{}' to {} at line {}",
                    file_path,
                    category.heading(),
                    line + 1
                );
                true
            }
            Err(e) => {
                tracing::warn!("Failed to add download entry for {}: {}", file_path, e);
                false
            }
        }
    }

    fn try_add_entry(
        &mut self,
        display_name: &str,
        file_path: &str,
        category: MaterialCategory,
    ) -> Result<usize> {
        for (field, value) in [("name", display_name), ("path", file_path)] {
            if value.trim().is_empty() {
                return Err(Error::Document(format!("entry {} is empty", field)));
            }
            if value.contains('"') || value.contains('\n') {
                return Err(Error::Document(format!(
                    "entry {} '{}' contains a quote or line break",
                    field, value
                )));
            }
        }

        let heading_line = self.ensure_section(category.heading());
        let at = self.section_end(heading_line);

        let mut block = vec![String::new()];
        block.extend(entry_block(display_name, file_path));
        self.lines.splice(at..at, block);

        Ok(at + 1)
    }

    /// Whether any entry already references `file_path`.
    pub fn has_entry(&self, file_path: &str) -> bool {
        let needle = format!("path=\"{}\"", file_path);
        self.lines.iter().any(|line| line.contains(&needle))
    }

    /// Add several entries, skipping paths that are already present.
    ///
    /// Returns how many entries were added.
    pub fn add_entries<'a, I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str, MaterialCategory)>,
    {
        let mut added = 0;
        for (display_name, file_path, category) in entries {
            if self.has_entry(file_path) {
                tracing::info!("Entry already present: {}", file_path);
                continue;
            }
            if self.add_entry(display_name, file_path, category) {
                added += 1;
            }
        }
        added
    }

    /// Collapse runs of three or more blank lines to exactly two.
    pub fn normalize_blank_runs(&mut self) {
        let mut blank_run = 0;
        self.lines.retain(|line| {
            if is_blank(line) {
                blank_run += 1;
                blank_run <= 2
            } else {
                blank_run = 0;
                true
            }
        });
    }

    /// File paths referenced in the section of `category`, in document order.
    pub fn entries_in_section(&self, category: MaterialCategory) -> Vec<String> {
        let Some(heading_line) = self.find_section(category.heading()) else {
            return Vec::new();
        };

        let end = self.section_end(heading_line);
        self.lines[heading_line..end]
            .iter()
            .flat_map(|line| ENTRY_PATH.captures_iter(line))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
