//! Unified run result.

use crate::parser::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a run: all output, or a failure message and no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunResult {
    Success { output: String },
    Failure { message: String },
}

impl RunResult {
    pub fn success(output: impl Into<String>) -> Self {
        RunResult::Success {
            output: output.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        RunResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Success { .. })
    }

    /// Output text; empty for failures.
    pub fn output(&self) -> &str {
        match self {
            RunResult::Success { output } => output,
            RunResult::Failure { .. } => "",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RunResult::Success { .. } => None,
            RunResult::Failure { message } => Some(message),
        }
    }
}

/// A failed validation becomes a failed run carrying the same message.
impl From<ParseError> for RunResult {
    fn from(e: ParseError) -> Self {
        RunResult::failure(e.to_string())
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunResult::Success { output } => write!(f, "{}\nSUCCESS!", output),
            RunResult::Failure { message } => write!(f, "\nERROR: {}", message),
        }
    }
}

/// Render a result for display: `"<output>\nSUCCESS!"` or `"\nERROR: <message>"`.
pub fn stringify_result(result: &RunResult) -> String {
    result.to_string()
}
