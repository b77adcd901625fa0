//! Course page module.
//!
//! Provides:
//! - Line-oriented course page editing
//! - New course page template

pub mod editor;
pub mod template;

pub use editor::{entry_block, CourseDocument, TRAILER_MARKER};
pub use template::course_page;
