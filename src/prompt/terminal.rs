//! Line-based prompts on the controlling terminal.

use console::{style, Term};

use crate::error::{Error, Result};
use crate::prompt::Prompter;

/// Answer that cancels any prompt.
const CANCEL: &str = "q";

/// Prompter reading answers line by line from the terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn ask(&self, question: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} {} ", style("?").green().bold(), question))?;
        let answer = self.term.read_line()?;
        let answer = answer.trim().to_string();

        if answer == CANCEL {
            return Err(Error::Cancelled);
        }
        Ok(answer)
    }

    fn list(&self, choices: &[String], marked: impl Fn(usize) -> bool) -> Result<()> {
        for (i, choice) in choices.iter().enumerate() {
            let marker = if marked(i) { ">" } else { " " };
            self.term
                .write_line(&format!("  {} {:>2}) {}", marker, i + 1, choice))?;
        }
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<()> {
        self.term
            .write_line(&format!("  {}", style(message).yellow()))?;
        Ok(())
    }
}

/// Parse `1, 3 4` style selections into zero-based indices.
pub fn parse_selection(input: &str, count: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let number: usize = token.parse().ok()?;
        if number == 0 || number > count {
            return None;
        }
        if !indices.contains(&(number - 1)) {
            indices.push(number - 1);
        }
    }
    indices.sort_unstable();
    Some(indices)
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, choices: &[String], default: usize) -> Result<usize> {
        if choices.is_empty() {
            return Err(Error::Cancelled);
        }
        let default = default.min(choices.len() - 1);

        self.term.write_line(&style(prompt).bold().to_string())?;
        self.list(choices, |i| i == default)?;

        loop {
            let answer = self.ask(&format!("Choice [{}]:", default + 1))?;
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_selection(&answer, choices.len()).as_deref() {
                Some([index]) => return Ok(*index),
                _ => self.warn(&format!("Enter a number between 1 and {}", choices.len()))?,
            }
        }
    }

    fn checkbox(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>> {
        self.term.write_line(&style(prompt).bold().to_string())?;
        self.list(choices, |_| true)?;

        loop {
            let answer = self.ask("Numbers separated by commas [all]:")?;
            if answer.is_empty() {
                return Ok((0..choices.len()).collect());
            }
            match parse_selection(&answer, choices.len()) {
                Some(indices) => return Ok(indices),
                None => self.warn(&format!("Use numbers between 1 and {}", choices.len()))?,
            }
        }
    }

    fn text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: &dyn Fn(&str) -> bool,
    ) -> Result<String> {
        let question = match default {
            Some(d) if !d.is_empty() => format!("{} [{}]:", prompt, d),
            _ => prompt.to_string(),
        };

        loop {
            let mut answer = self.ask(&question)?;
            if answer.is_empty() {
                if let Some(d) = default {
                    answer = d.to_string();
                }
            }
            if validate(&answer) {
                return Ok(answer);
            }
            self.warn("Invalid input, try again")?;
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{} {}", prompt, hint))?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.warn("Answer y or n")?,
            }
        }
    }
}
