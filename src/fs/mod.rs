//! Filesystem module.
//!
//! Provides:
//! - Staging directory scanning and validation
//! - Filename composition and sanitizing
//! - Resource tree placement and cleanup

pub mod naming;
pub mod paths;
pub mod scan;

pub use naming::{
    compose_filename, display_name, make_unique_filename, sanitize_filename, split_extension,
    suggest_filename,
};
pub use paths::{
    copy_to_resources, course_resources_dir, public_path, remove_candidate, repo_path_of_public,
};
pub use scan::{
    format_size, group_by_course, scan_staging_dir, validate, FileCandidate, Rejection,
    UNSORTED_GROUP,
};
