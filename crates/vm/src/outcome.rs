//! Result of executing instructions.

/// What the machine reports after a step or a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Execution can proceed with the next instruction.
    Continue,
    /// The program finished with the switch set; carries the full output.
    Success(String),
    /// The input did not match. Carries the 1-based input line number.
    Failure { line: usize },
}

impl Outcome {
    /// True once execution has stopped, successfully or not.
    pub fn is_final(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }

    /// The translated text, if the run succeeded.
    pub fn output(&self) -> Option<&str> {
        match self {
            Outcome::Success(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Continue => f.write_str("running"),
            Outcome::Success(_) => f.write_str("ok"),
            Outcome::Failure { line } => write!(f, "SYNTAX ERROR IN LINE {line}"),
        }
    }
}
