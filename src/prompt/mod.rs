//! Interactive prompt module.
//!
//! Provides:
//! - The `Prompter` interface the workflow asks its questions through
//! - A line-based terminal implementation

pub mod terminal;

pub use terminal::TerminalPrompter;

use crate::error::Result;

/// Source of interactive answers.
///
/// Every method returns `Error::Cancelled` when the user backs out.
pub trait Prompter {
    /// Pick one of `choices`; returns its index.
    fn select(&mut self, prompt: &str, choices: &[String], default: usize) -> Result<usize>;

    /// Pick any subset of `choices` (all preselected); returns their indices.
    fn checkbox(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>>;

    /// Free text, re-asked until `validate` accepts it.
    fn text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: &dyn Fn(&str) -> bool,
    ) -> Result<String>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Validator accepting any non-blank answer.
pub fn non_blank(input: &str) -> bool {
    !input.trim().is_empty()
}

/// Validator accepting anything, including an empty answer.
pub fn any_text(_input: &str) -> bool {
    true
}

/// Validator accepting a four-digit year such as `2024`.
pub fn four_digit_year(input: &str) -> bool {
    let input = input.trim();
    input.len() == 4 && input.chars().all(|c| c.is_ascii_digit())
}
