//! Run mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available run modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Classify, file and publish staged materials (default).
    #[default]
    Interactive,
    /// Only print the inferred hints for every staged file.
    Inspect,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Interactive => write!(f, "interactive"),
            RunMode::Inspect => write!(f, "inspect"),
        }
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interactive" => Ok(RunMode::Interactive),
            "inspect" => Ok(RunMode::Inspect),
            _ => Err(format!("Unknown run mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_mode() {
        assert_eq!("Inspect".parse::<RunMode>().unwrap(), RunMode::Inspect);
        assert_eq!(RunMode::default().to_string(), "interactive");
        assert!("batch".parse::<RunMode>().is_err());
    }
}
