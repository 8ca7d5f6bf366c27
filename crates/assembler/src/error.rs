//! Error types for the META II assembler.

use thiserror::Error;

/// Errors produced while assembling text into a program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A mnemonic that is neither an opcode nor a pseudo-op.
    #[error("line {line}: unknown opcode '{mnemonic}' in {text:?}")]
    UnknownOpcode {
        line: usize,
        mnemonic: String,
        text: String,
    },

    /// An opcode or pseudo-op is missing its operand.
    #[error("line {line}: {opcode} expects {expected} operand(s)")]
    MissingOperand {
        line: usize,
        opcode: &'static str,
        expected: usize,
    },

    /// An operand of the wrong kind (an integer where text is required).
    #[error("line {line}: {opcode} cannot take operand '{token}'")]
    InvalidOperand {
        line: usize,
        opcode: &'static str,
        token: String,
    },

    /// A token appeared after the last operand an opcode accepts.
    #[error("line {line}: unexpected operand '{token}'")]
    UnexpectedOperand { line: usize, token: String },

    /// A token starting with a digit is not a valid unsigned integer.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A quoted literal has no closing quote.
    #[error("line {line}: unterminated string in {text:?}")]
    UnterminatedString { line: usize, text: String },

    /// The `adr` pseudo-op names a label that is never defined.
    #[error("start address refers to undefined label '{label}'")]
    UndefinedStart { label: String },
}
