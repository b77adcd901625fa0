//! Course module.
//!
//! Provides:
//! - Course registry loading from the navigation file
//! - Course lookup and fuzzy matching
//! - New course creation

pub mod registry;

pub use registry::{Course, CourseRegistry, MetaUpdate};
