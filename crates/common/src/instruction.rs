//! Decoded instructions and their operands.
//!
//! An instruction is an opcode plus the operands written after it on its
//! assembly line. Instructions are immutable once loaded.

use crate::opcode::Opcode;

/// A single instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A quoted string literal, quotes stripped.
    Literal(String),
    /// An unsigned integer (an absolute address when used as a target).
    Integer(u64),
    /// A bare word. Resolved as a label name when used as a target.
    Symbol(String),
}

impl Operand {
    /// The string carried by a literal or symbol. Integers carry no text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Operand::Literal(s) | Operand::Symbol(s) => Some(s),
            Operand::Integer(_) => None,
        }
    }
}

impl std::fmt::Display for Operand {
    /// Formats the operand the way the assembler reads it back.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Literal(s) => write!(f, "'{s}'"),
            Operand::Integer(n) => write!(f, "{n}"),
            Operand::Symbol(s) => f.write_str(s),
        }
    }
}

/// One decoded META II instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Operands, in source order.
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }

    /// Create an instruction with no operands.
    pub fn bare(opcode: Opcode) -> Self {
        Self::new(opcode, Vec::new())
    }

    /// Operand at `index`, if present.
    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}
