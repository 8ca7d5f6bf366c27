//! Parser for META II statements → instructions and pseudo-ops.
//!
//! Each opcode takes at most one operand; its shape decides what is
//! accepted. Extra words are an error rather than being folded into the
//! operand (`cl hello world`), and operand-less opcodes reject an operand
//! rather than ignoring it (`out 'x'`). Quote text that contains spaces.

use crate::error::AsmError;
use metaii_common::{Instruction, Opcode, Operand, OperandShape};

/// What a statement line contributes to the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement {
    /// An executable instruction.
    Instruction(Instruction),
    /// `adr`: the start address, resolved once all labels are known.
    Start(Operand),
    /// `end`: stop reading the source.
    End,
}

/// Parse a mnemonic and its operands into a statement.
pub(crate) fn parse_statement(
    mnemonic: &str,
    operands: Vec<Operand>,
    line_num: usize,
    raw: &str,
) -> Result<Statement, AsmError> {
    if mnemonic.eq_ignore_ascii_case("adr") {
        expect_one(&operands, line_num, "adr")?;
        let start = operands.into_iter().next().ok_or(AsmError::MissingOperand {
            line: line_num,
            opcode: "adr",
            expected: 1,
        })?;
        return Ok(Statement::Start(start));
    }
    if mnemonic.eq_ignore_ascii_case("end") {
        return Ok(Statement::End);
    }

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_num,
        mnemonic: mnemonic.to_string(),
        text: raw.to_string(),
    })?;

    match opcode.operand_shape() {
        OperandShape::None => expect_end(&operands, line_num)?,
        OperandShape::Target => expect_one(&operands, line_num, opcode.mnemonic())?,
        OperandShape::Text => {
            expect_one(&operands, line_num, opcode.mnemonic())?;
            if let Some(Operand::Integer(n)) = operands.first() {
                return Err(AsmError::InvalidOperand {
                    line: line_num,
                    opcode: opcode.mnemonic(),
                    token: n.to_string(),
                });
            }
        }
    }

    Ok(Statement::Instruction(Instruction::new(opcode, operands)))
}

/// Require exactly one operand.
fn expect_one(operands: &[Operand], line: usize, opcode: &'static str) -> Result<(), AsmError> {
    if operands.is_empty() {
        return Err(AsmError::MissingOperand {
            line,
            opcode,
            expected: 1,
        });
    }
    expect_end(&operands[1..], line)
}

/// Check that there are no extra operands.
fn expect_end(remaining: &[Operand], line: usize) -> Result<(), AsmError> {
    if let Some(extra) = remaining.first() {
        return Err(AsmError::UnexpectedOperand {
            line,
            token: extra.to_string(),
        });
    }
    Ok(())
}
