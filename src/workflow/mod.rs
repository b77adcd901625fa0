//! Upload workflow module.
//!
//! Handles:
//! - Session state (processed entries)
//! - Per-file classification and site edits
//! - Branch, commit, push and pull request
//! - The top-level interactive and inspect runs

pub mod process;
pub mod publish;
pub mod run;
pub mod state;

pub use process::FileOutcome;
pub use run::{Publisher, RunOutcome, Workflow};
pub use state::{ProcessedEntry, Session};
