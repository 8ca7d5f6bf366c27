//! META II common types.
//!
//! This crate provides the data model shared by the assembler and the VM:
//!
//! - [`Opcode`] — the closed set of META II operations
//! - [`Operand`] — literal, integer, or symbol operands
//! - [`Instruction`] — an opcode with its operands
//! - [`Program`] — instructions, label table, and start index
//! - [`LookupError`] — failure to resolve a branch target
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::LookupError;
pub use instruction::{Instruction, Operand};
pub use opcode::{Opcode, OperandShape};
pub use program::Program;
