//! META II virtual machine — runs syntax-directed translators.
//!
//! The VM reads an input text, matches tokens against it, and assembles
//! output lines. State shared between instructions:
//! - An input cursor that moves forward past whitespace before every match
//!   attempt, and past the matched text on a hit
//! - A single condition flag (the switch) set by every match
//! - A call stack of frames, each with two lazily allocated label slots
//! - The output buffer and the line under construction
//!
//! # Usage
//!
//! ```
//! use metaii_assembler::assemble;
//! use metaii_vm::{run, Outcome};
//!
//! let program = assemble("\ttst 'x'\n\tcl 'saw x'\n\tout\n").unwrap();
//!
//! assert_eq!(run(&program, "x").unwrap(), Outcome::Success("\tsaw x\n".to_string()));
//! assert_eq!(run(&program, "y").unwrap(), Outcome::Failure { line: 1 });
//! ```

pub mod error;
pub mod execute;
pub mod machine;
pub mod outcome;

pub use error::RuntimeError;
pub use machine::{Frame, FrameKind, VM};
pub use outcome::Outcome;

use metaii_common::Program;

/// Translate `input` with `program` and return the outcome.
///
/// This is the primary entry point for the VM. To run one program over
/// many inputs, create a [`VM`] once and call [`VM::run`] repeatedly.
///
/// # Errors
///
/// Returns [`RuntimeError`] if the program itself is malformed (undefined
/// label, missing operand, unbalanced return). A mismatch between program
/// and input is not an error; it is reported as [`Outcome::Failure`].
pub fn run(program: &Program, input: &str) -> Result<Outcome, RuntimeError> {
    let mut vm = VM::new(program);
    vm.run(input)
}
