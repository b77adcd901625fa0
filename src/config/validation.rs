//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.limits.max_file_size == 0 {
        return Err(Error::ConfigValidation {
            field: "limits.max_file_size".to_string(),
            message: "Size limit must be greater than zero".to_string(),
        });
    }

    if config.limits.allowed_extensions.is_empty() {
        return Err(Error::ConfigValidation {
            field: "limits.allowed_extensions".to_string(),
            message: "At least one file extension must be allowed".to_string(),
        });
    }

    if let Some(ext) = config
        .limits
        .allowed_extensions
        .iter()
        .find(|ext| ext.is_empty() || ext.starts_with('.'))
    {
        return Err(Error::ConfigValidation {
            field: "limits.allowed_extensions".to_string(),
            message: format!("Extensions are listed without a leading dot (got '{}')", ext),
        });
    }

    if config.git.remote.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "git.remote".to_string(),
            message: "Remote name cannot be empty".to_string(),
        });
    }

    if config.git.base_branch.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "git.base_branch".to_string(),
            message: "Base branch cannot be empty".to_string(),
        });
    }

    validate_branch_prefix(&config.git.branch_prefix)?;

    Ok(())
}

/// Validate the prefix of generated branch names.
pub fn validate_branch_prefix(prefix: &str) -> Result<()> {
    let valid = !prefix.is_empty()
        && !prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains("..")
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-'));

    if !valid {
        return Err(Error::ConfigValidation {
            field: "git.branch_prefix".to_string(),
            message: format!(
                "Branch prefix '{}' must be non-empty and use only letters, digits, '.', '_', '-' and inner '/'",
                prefix
            ),
        });
    }

    Ok(())
}

/// Whether a course key is usable as a page name and URL segment.
pub fn is_valid_course_key(key: &str) -> bool {
    !key.is_empty()
        && key.chars().any(|c| c.is_ascii_alphanumeric())
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
