//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Spinners for git and GitHub calls
//! - Preview and summary reporting

pub mod console;
pub mod progress;
pub mod report;

pub use console::{
    print_banner, print_config_summary, print_error, print_file_status, print_info, print_step,
    print_success, print_warning,
};
pub use progress::{create_spinner, with_spinner};
pub use report::{print_hints, print_preview, print_summary};
