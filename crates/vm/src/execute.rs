//! Main execution loop and opcode dispatch for the META II VM.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RuntimeError;
use crate::machine::VM;
use crate::outcome::Outcome;
use metaii_common::{Instruction, LookupError, Opcode};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*").expect("identifier pattern"));
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*").expect("number pattern"));
static STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'[^']+'").expect("string pattern"));

impl<'a> VM<'a> {
    /// Translate `input`, starting from a full reset.
    ///
    /// Returns [`Outcome::Success`] with the complete output, or
    /// [`Outcome::Failure`] with the input line where matching stopped.
    /// Output is never returned on failure.
    pub fn run(&mut self, input: &str) -> Result<Outcome, RuntimeError> {
        self.start(input);
        tracing::debug!(
            instructions = self.program.len(),
            start = self.pc,
            input_len = input.len(),
            "run started"
        );

        loop {
            let outcome = self.step()?;
            if outcome.is_final() {
                tracing::debug!(%outcome, cursor = self.cursor, "run finished");
                return Ok(outcome);
            }
        }
    }

    /// Execute one instruction.
    ///
    /// Once the program counter has left the program, reports the final
    /// outcome instead (see [`VM::finish`]).
    pub fn step(&mut self) -> Result<Outcome, RuntimeError> {
        let program = self.program;
        let Some(instr) = program.instructions.get(self.pc) else {
            return Ok(self.finish());
        };
        let at = self.pc;
        self.pc += 1;

        tracing::trace!(pc = at, %instr, switch = self.switch, "step");

        match instr.opcode {
            // Input matching
            Opcode::Tst => self.exec_tst(instr, at)?,
            Opcode::Id => self.exec_pattern(&IDENTIFIER),
            Opcode::Num => self.exec_pattern(&NUMBER),
            Opcode::Sr => self.exec_pattern(&STRING),

            // Control flow
            Opcode::Cll => self.exec_call(instr, at)?,
            Opcode::R => self.exec_return(at)?,
            Opcode::Set => self.switch = true,
            Opcode::B => self.exec_branch(instr, at, true)?,
            Opcode::Bt => self.exec_branch(instr, at, self.switch)?,
            Opcode::Bf => self.exec_branch(instr, at, !self.switch)?,
            Opcode::Be => {
                if !self.switch {
                    return Ok(Outcome::Failure {
                        line: self.line_number(),
                    });
                }
            }

            // Output generation
            Opcode::Cl => {
                let text = self.text_operand(instr, at)?;
                self.line.push_str(text);
            }
            Opcode::Ci => self.line.push_str(&self.last_matched),
            Opcode::Gn1 => self.exec_generate(0, at)?,
            Opcode::Gn2 => self.exec_generate(1, at)?,
            Opcode::Lb => self.pending_label = true,
            Opcode::Out => self.exec_out(),
        }

        Ok(Outcome::Continue)
    }

    /// The outcome of a run whose program counter has left the program:
    /// success with the output if the switch is set, failure otherwise.
    pub fn finish(&self) -> Outcome {
        if self.switch {
            Outcome::Success(self.output.clone())
        } else {
            Outcome::Failure {
                line: self.line_number(),
            }
        }
    }

    /// The text operand of `tst` and `cl`.
    fn text_operand(&self, instr: &'a Instruction, at: usize) -> Result<&'a str, RuntimeError> {
        let operand = instr.operand(0).ok_or(RuntimeError::MissingOperand {
            at,
            opcode: instr.opcode,
        })?;
        operand.as_text().ok_or(RuntimeError::InvalidOperand {
            at,
            opcode: instr.opcode,
        })
    }

    /// The resolved branch target of `cll`, `b`, `bt` and `bf`.
    fn target(&self, instr: &Instruction, at: usize) -> Result<usize, RuntimeError> {
        let operand = instr.operand(0).ok_or(RuntimeError::MissingOperand {
            at,
            opcode: instr.opcode,
        })?;
        self.program.resolve(operand).map_err(|err| match err {
            LookupError::UndefinedLabel(label) => RuntimeError::UndefinedLabel { at, label },
        })
    }

    // ---- Input matching ----

    /// Skip whitespace, then test for a literal string.
    fn exec_tst(&mut self, instr: &'a Instruction, at: usize) -> Result<(), RuntimeError> {
        let text = self.text_operand(instr, at)?;
        self.skip_whitespace();
        self.switch = self.remaining().starts_with(text);
        if self.switch {
            self.consume(text.len());
        }
        Ok(())
    }

    /// Skip whitespace, then match an anchored pattern.
    fn exec_pattern(&mut self, pattern: &Regex) {
        self.skip_whitespace();
        let found = pattern.find(self.remaining()).map(|m| m.end());
        self.switch = found.is_some();
        if let Some(len) = found {
            self.consume(len);
        }
    }

    // ---- Control flow ----

    fn exec_call(&mut self, instr: &Instruction, at: usize) -> Result<(), RuntimeError> {
        let target = self.target(instr, at)?;
        self.push_frame(self.pc);
        self.pc = target;
        Ok(())
    }

    fn exec_return(&mut self, at: usize) -> Result<(), RuntimeError> {
        self.pc = self.pop_frame(at)?;
        Ok(())
    }

    fn exec_branch(&mut self, instr: &Instruction, at: usize, taken: bool) -> Result<(), RuntimeError> {
        if taken {
            self.pc = self.target(instr, at)?;
        }
        Ok(())
    }

    // ---- Output generation ----

    fn exec_generate(&mut self, slot: usize, at: usize) -> Result<(), RuntimeError> {
        let label = self.temp_label(slot, at)?;
        self.line.push('l');
        self.line.push_str(&label.to_string());
        Ok(())
    }

    /// Flush the output line, tab-indented unless a label was announced.
    fn exec_out(&mut self) {
        if !self.pending_label {
            self.output.push('\t');
        }
        self.output.push_str(&self.line);
        self.output.push('\n');
        self.line.clear();
        self.pending_label = false;
    }
}
