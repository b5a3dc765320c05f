use std::fmt;

use thiserror::Error;

use crate::domain::TagFormatError;

/// Unified error type for git-gate operations
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag format error: {0}")]
    Format(#[from] TagFormatError),

    #[error("No tag set, can't determine highest one")]
    EmptySet,

    #[error("Command `{command}` failed ({})", describe_exit(.code))]
    Command {
        command: String,
        code: Option<i32>,
        output: Vec<String>,
    },

    #[error("{0}")]
    Check(CheckFailure),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-gate
pub type Result<T> = std::result::Result<T, GateError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl GateError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GateError::Config(msg.into())
    }

    /// Lines to show the user when this error stops a run.
    ///
    /// Command failures include the captured output so the user sees why
    /// the tool complained without rerunning it.
    pub fn user_lines(&self) -> Vec<String> {
        match self {
            GateError::Check(failure) => failure.problems.clone(),
            GateError::Command { output, .. } => {
                let mut lines = vec![self.to_string()];
                if !output.is_empty() {
                    lines.push("output:".to_string());
                    lines.extend(output.iter().cloned());
                }
                lines
            }
            other => vec![other.to_string()],
        }
    }

    /// Corrective commands attached to this error, if any.
    pub fn suggestions(&self) -> &[String] {
        match self {
            GateError::Check(failure) => &failure.suggestions,
            _ => &[],
        }
    }
}

impl From<CheckFailure> for GateError {
    fn from(failure: CheckFailure) -> Self {
        GateError::Check(failure)
    }
}

/// A failed hygiene check: what is wrong, and what to run about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckFailure {
    pub problems: Vec<String>,
    pub suggestions: Vec<String>,
}

impl CheckFailure {
    pub fn new(problem: impl Into<String>) -> Self {
        CheckFailure {
            problems: vec![problem.into()],
            suggestions: Vec::new(),
        }
    }

    /// Append another problem line
    pub fn problem(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        if !line.is_empty() {
            self.problems.push(line);
        }
        self
    }

    /// Append a corrective command
    pub fn suggest(mut self, command: impl Into<String>) -> Self {
        self.suggestions.push(command.into());
        self
    }

    /// Merge another failure into this one, keeping order
    pub fn absorb(&mut self, other: CheckFailure) {
        self.problems.extend(other.problems);
        self.suggestions.extend(other.suggestions);
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty() && self.suggestions.is_empty()
    }

    /// `Ok(())` when nothing was collected, the failure otherwise
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(GateError::Check(self))
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.problems.join("\n"))
    }
}
