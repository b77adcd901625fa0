//! Configuration module for share-upload.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Run modes
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, GitConfig, LimitsConfig, OptionsConfig, PathsConfig, DEFAULT_CONFIG_FILE};
pub use modes::RunMode;
pub use validation::{is_valid_course_key, validate_branch_prefix, validate_config};
