//! META II assembler — text ↔ program translation.
//!
//! Assembly text is line-oriented. A line starting in column 0 defines a
//! label bound to the next instruction; an indented line holds a mnemonic
//! and its operand. Two pseudo-ops are recognized: `adr` sets the start
//! address and `end` stops assembly.
//!
//! Mnemonics, `adr` and `end` are matched without regard to ASCII case, so
//! upper-case listings load as written. This is an extension to the
//! lower-case instruction set; anything else outside it is rejected.
//!
//! Loading is stricter than a bare opcode lookup: every instruction is
//! checked for the number and kind of operands its opcode takes (see
//! `parser`).
//!
//! # Usage
//!
//! ```
//! use metaii_assembler::{assemble, disassemble};
//!
//! let text = "\tadr MAIN\nMAIN\n\tcl 'hi'\n\tout\n\tend\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(program.label("MAIN"), Some(0));
//! assert_eq!(disassemble(&program), "\tadr 0\nMAIN\n\tcl 'hi'\n\tout\n\tend\n");
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every program the
//! assembler produces.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use std::collections::BTreeMap;

use lexer::{scan_line, SourceLine};
use metaii_common::{Operand, Program};
use parser::{parse_statement, Statement};

/// Assemble text into a program.
///
/// Labels may be referenced before they are defined. Redefining a label
/// rebinds it. The start address is resolved after the whole source has
/// been read. Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut instructions = Vec::new();
    let mut labels = BTreeMap::new();
    let mut start = Operand::Integer(0);

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        match scan_line(line, line_num)? {
            SourceLine::Blank => {}
            SourceLine::Label(name) => {
                labels.insert(name, instructions.len());
            }
            SourceLine::Statement { mnemonic, operands } => {
                match parse_statement(&mnemonic, operands, line_num, line)? {
                    Statement::Instruction(instr) => instructions.push(instr),
                    Statement::Start(target) => start = target,
                    Statement::End => break,
                }
            }
        }
    }

    let start = match start {
        Operand::Integer(addr) => addr as usize,
        Operand::Literal(label) | Operand::Symbol(label) => match labels.get(&label) {
            Some(&index) => index,
            None => return Err(AsmError::UndefinedStart { label }),
        },
    };

    tracing::debug!(
        instructions = instructions.len(),
        labels = labels.len(),
        start,
        "assembled program"
    );

    Ok(Program::new(instructions, labels, start))
}

/// Disassemble a program into canonical assembly text.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
