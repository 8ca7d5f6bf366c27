//! Lookup errors for META II programs.

use thiserror::Error;

/// Errors that occur when resolving a branch target against a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The operand names a label that was never defined.
    #[error("undefined label '{0}'")]
    UndefinedLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_undefined_label() {
        assert_eq!(
            LookupError::UndefinedLabel("EX3".to_string()).to_string(),
            "undefined label 'EX3'"
        );
    }
}
