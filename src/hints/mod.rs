//! Filename hint module.
//!
//! Provides:
//! - Material categories and their course page headings
//! - Named stripping rules for course-name inference
//! - Course, category and year hints from filenames

pub mod category;
pub mod extractor;
pub mod rules;

pub use category::MaterialCategory;
pub use extractor::{extract, guess_category, guess_course, guess_year, Hints};
pub use rules::{course_strip_rules, StripRule};
