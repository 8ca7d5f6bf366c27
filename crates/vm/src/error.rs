//! Runtime errors for the META II VM.
//!
//! These indicate a malformed program, not a mismatch between the program
//! and its input. A mismatch is reported as [`crate::Outcome::Failure`].
//! Every error includes the instruction index (`at`) for debugging.

use metaii_common::Opcode;
use thiserror::Error;

/// Errors that abort execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A branch or call named a label missing from the label table.
    #[error("undefined label '{label}' at instruction {at}")]
    UndefinedLabel { at: usize, label: String },

    /// An instruction is missing the operand its opcode requires.
    #[error("{opcode} without operand at instruction {at}")]
    MissingOperand { at: usize, opcode: Opcode },

    /// An instruction carries an operand its opcode cannot use.
    #[error("invalid operand for {opcode} at instruction {at}")]
    InvalidOperand { at: usize, opcode: Opcode },

    /// A return or label generation with no call frame left.
    #[error("call stack underflow at instruction {at}")]
    StackUnderflow { at: usize },
}
