//! share-upload - add course materials to a study-sharing site
//!
//! This library turns loosely named files dropped into a staging directory
//! into download entries on the site's course pages.
//!
//! # Features
//!
//! - Course, material type and year hints from free-form filenames
//! - Normalized target filenames (`2024-期末-试卷.pdf`)
//! - Section-aware insertion of download entries into course pages
//! - Course registry maintenance for new courses
//! - Branch, commit, push and pull request through `git` and `gh`
//!
//! # Example
//!
//! ```no_run
//! use share_upload::{hints, fs::compose_filename, document::CourseDocument};
//! use std::path::Path;
//!
//! fn main() -> share_upload::Result<()> {
//!     let hints = hints::extract("2023-2024学年第一学期数据结构期末试卷.pdf", None);
//!     let category = hints.category.unwrap_or(hints::MaterialCategory::Other);
//!     let filename = compose_filename("数据结构期末试卷.pdf", "2024", category);
//!
//!     let mut page = CourseDocument::load(Path::new("pages/courses/shujujiegou.mdx"))?;
//!     let path = format!("/resources/数据结构/{}", filename);
//!     if !page.has_entry(&path) && page.add_entry(&filename, &path, category) {
//!         page.normalize_blank_runs();
//!         page.save()?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod course;
pub mod document;
pub mod error;
pub mod fs;
pub mod hints;
pub mod output;
pub mod prompt;
pub mod vcs;
pub mod workflow;

// Re-exports for convenience
pub use config::{Config, RunMode};
pub use course::{Course, CourseRegistry};
pub use document::CourseDocument;
pub use error::{Error, Result};
pub use fs::FileCandidate;
pub use hints::{Hints, MaterialCategory};
pub use workflow::{RunOutcome, Workflow};
