//! Program representation for META II assembly.
//!
//! A program is a flat instruction sequence, a label table mapping names to
//! instruction indices, and a resolved start index. A label bound to
//! `len()` is legal: it names the position just past the last instruction.

use std::collections::BTreeMap;

use crate::error::LookupError;
use crate::instruction::{Instruction, Operand};
use crate::opcode::OperandShape;

/// A loaded META II program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
    /// Label name to instruction index.
    pub labels: BTreeMap<String, usize>,
    /// Index of the first instruction to execute.
    pub start: usize,
}

impl Program {
    /// Create a new program.
    pub fn new(instructions: Vec<Instruction>, labels: BTreeMap<String, usize>, start: usize) -> Self {
        Self {
            instructions,
            labels,
            start,
        }
    }

    /// Create a program with no labels that starts at instruction 0.
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions, BTreeMap::new(), 0)
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Index bound to `name`, if any.
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Names of every label bound to `index`, in name order.
    pub fn labels_at(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.labels
            .iter()
            .filter(move |(_, &at)| at == index)
            .map(|(name, _)| name.as_str())
    }

    /// Resolve a branch target to an instruction index.
    ///
    /// Integers are absolute addresses and are returned as-is, even when
    /// they point outside the program. String operands are looked up in the
    /// label table.
    pub fn resolve(&self, target: &Operand) -> Result<usize, LookupError> {
        match target {
            Operand::Integer(addr) => Ok(*addr as usize),
            Operand::Literal(name) | Operand::Symbol(name) => self
                .label(name)
                .ok_or_else(|| LookupError::UndefinedLabel(name.clone())),
        }
    }

    /// Target names referenced by branch and call instructions that have no
    /// binding in the label table. Each name is reported once, in order of
    /// first reference.
    pub fn undefined_labels(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for instr in &self.instructions {
            if instr.opcode.operand_shape() != OperandShape::Target {
                continue;
            }
            let Some(name) = instr.operand(0).and_then(Operand::as_text) else {
                continue;
            };
            if !self.labels.contains_key(name) && !missing.contains(&name) {
                missing.push(name);
            }
        }
        missing
    }
}
