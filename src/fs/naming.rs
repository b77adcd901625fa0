//! Filename generation and manipulation.

use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::error::{Error, Result};
use crate::fs::scan::FileCandidate;
use crate::hints::rules::{trim_separators, EXAM_TYPE, LEADING_YEAR, MATERIAL_KEYWORD};
use crate::hints::MaterialCategory;

/// Split `name.ext` into stem and extension. Dotfiles have no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

/// Suggest a normalized target filename for a staged file.
///
/// The year falls back from `chosen_year` to the filename's year hint and
/// finally to the current year.
pub fn suggest_filename(
    candidate: &FileCandidate,
    chosen_year: Option<&str>,
    category: MaterialCategory,
) -> String {
    let year = chosen_year
        .filter(|y| !y.trim().is_empty())
        .map(str::to_string)
        .or_else(|| candidate.hints.year.clone())
        .unwrap_or_else(|| chrono::Local::now().year().to_string());

    compose_filename(&candidate.name, &year, category)
}

/// Build `year-category-description.ext` from an original filename.
pub fn compose_filename(original: &str, year: &str, category: MaterialCategory) -> String {
    let (stem, extension) = split_extension(original);

    let description = MATERIAL_KEYWORD.apply(&EXAM_TYPE.apply(&LEADING_YEAR.apply(stem)));
    let description = match trim_separators(&description) {
        "" => category.default_noun(),
        rest => rest,
    };

    let mut filename = format!("{}-{}-{}", year.trim(), category.short_label(), description);
    if let Some(ext) = extension {
        filename.push('.');
        filename.push_str(ext);
    }
    filename
}

/// Display name stored in a course page: the filename without extension.
pub fn display_name(filename: &str) -> &str {
    split_extension(filename).0
}

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let name = name.trim();

    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "'{}' must be a plain file name without path components",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    // Quotes would break the attribute syntax of a download entry
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if split_extension(&sanitized).0.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Highest numeric suffix tried by [`make_unique_filename`].
const MAX_SUFFIX: u32 = 999;

/// Generate a unique path by appending a number if the file exists.
///
/// Fails when every suffix up to `_999` is taken.
pub fn make_unique_filename(path: &Path) -> Result<PathBuf> {
    unique_with_limit(path, MAX_SUFFIX)
}

fn unique_with_limit(path: &Path, limit: u32) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let (stem, ext) = split_extension(filename);
    let parent = path.parent().unwrap_or(Path::new("."));

    for counter in 1..=limit {
        let new_name = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };

        let new_path = parent.join(&new_name);
        if !new_path.exists() {
            return Ok(new_path);
        }
    }

    Err(Error::InvalidFilename(format!(
        "no free name left for '{}' in {}",
        filename,
        parent.display()
    )))
}
