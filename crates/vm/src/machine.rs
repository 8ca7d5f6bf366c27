//! VM state management: input cursor, switch, call frames, output assembly.

use crate::error::RuntimeError;
use metaii_common::Program;

/// How a call frame was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Three stack slots: return address and two label slots.
    Full,
    /// One stack slot. Pushed when the caller's label slots were both
    /// unallocated, so the callee borrows them. Returning clears them.
    Elided,
}

/// A call frame for subroutine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// How this frame was pushed.
    pub kind: FrameKind,
    /// Instruction index to return to after `r`.
    pub return_address: usize,
    /// Temporary label numbers for `gn1` (index 0) and `gn2` (index 1).
    /// Zero means not yet allocated.
    pub labels: [u32; 2],
}

impl Frame {
    fn new(kind: FrameKind, return_address: usize) -> Self {
        Self {
            kind,
            return_address,
            labels: [0, 0],
        }
    }
}

/// The META II virtual machine.
///
/// One instance can run the same program over many inputs; every run starts
/// from a full reset.
pub struct VM<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Program counter (instruction index).
    pub(crate) pc: usize,
    /// Text being translated.
    pub(crate) input: String,
    /// Byte offset of the next unread input character.
    pub(crate) cursor: usize,
    /// The condition flag.
    pub(crate) switch: bool,
    /// Call stack. The bottom frame returns past the end of the program.
    pub(crate) frames: Vec<Frame>,
    /// Completed output lines.
    pub(crate) output: String,
    /// The output line under construction.
    pub(crate) line: String,
    /// Suppress the indentation of the next flushed line.
    pub(crate) pending_label: bool,
    /// Text consumed by the last successful match.
    pub(crate) last_matched: String,
    /// Last temporary label number handed out.
    pub(crate) next_label: u32,
}

impl<'a> VM<'a> {
    /// Create a new VM for the given program.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            pc: program.start,
            input: String::new(),
            cursor: 0,
            switch: true,
            frames: Vec::new(),
            output: String::new(),
            line: String::new(),
            pending_label: false,
            last_matched: String::new(),
            next_label: 0,
        }
    }

    /// Clear all execution state left by a previous run.
    pub fn reset(&mut self) {
        self.pc = self.program.start;
        self.input.clear();
        self.cursor = 0;
        self.switch = true;
        self.frames.clear();
        self.output.clear();
        self.line.clear();
        self.pending_label = false;
        self.last_matched.clear();
        self.next_label = 0;
    }

    /// Reset and prepare to translate `input` from the program's start.
    ///
    /// The bottom call frame returns to `program.len()`, so an `r` at top
    /// level ends the run.
    pub fn start(&mut self, input: &str) {
        self.reset();
        self.input.push_str(input);
        self.frames.push(Frame::new(FrameKind::Full, self.program.len()));
    }

    /// Current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// True while the program counter is inside the program.
    pub fn is_running(&self) -> bool {
        self.pc < self.program.len()
    }

    /// Current value of the condition flag.
    pub fn switch(&self) -> bool {
        self.switch
    }

    /// Byte offset of the input cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the input cursor to an absolute byte offset, clamped to the
    /// input and to a character boundary.
    pub fn seek(&mut self, position: usize) {
        let mut position = position.min(self.input.len());
        while !self.input.is_char_boundary(position) {
            position -= 1;
        }
        self.cursor = position;
    }

    /// Unread input, from the cursor on.
    pub fn remaining(&self) -> &str {
        &self.input[self.cursor..]
    }

    /// 1-based line number of the cursor.
    pub fn line_number(&self) -> usize {
        self.input.as_bytes()[..self.cursor]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }

    /// Text consumed by the last successful match.
    pub fn last_matched(&self) -> &str {
        &self.last_matched
    }

    /// Completed output lines.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The output line under construction.
    pub fn pending_line(&self) -> &str {
        &self.line
    }

    /// Call frames, bottom first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The call stack in its flat integer layout.
    ///
    /// A full frame occupies three entries: return address, `gn2` slot,
    /// `gn1` slot. An elided frame stores its negated return address and
    /// its `gn2` slot over the caller's two unallocated label slots and adds
    /// one entry for its `gn1` slot.
    pub fn encoded_stack(&self) -> Vec<i64> {
        let mut stack: Vec<i64> = Vec::with_capacity(self.frames.len() * 3);
        for frame in &self.frames {
            let [gn1, gn2] = frame.labels;
            let ret = frame.return_address as i64;
            match frame.kind {
                FrameKind::Full => stack.extend([ret, i64::from(gn2), i64::from(gn1)]),
                FrameKind::Elided => {
                    let n = stack.len();
                    if n >= 2 {
                        stack[n - 2] = -ret;
                        stack[n - 1] = i64::from(gn2);
                    }
                    stack.push(i64::from(gn1));
                }
            }
        }
        stack
    }

    /// Move the cursor past any whitespace. Runs before every match
    /// attempt, hit or miss.
    pub(crate) fn skip_whitespace(&mut self) {
        let blanks = self
            .remaining()
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c))
            .count();
        self.cursor += blanks;
    }

    /// Consume `len` bytes at the cursor, recording them as the last match.
    pub(crate) fn consume(&mut self, len: usize) {
        let to = self.cursor + len;
        self.last_matched.clear();
        self.last_matched.push_str(&self.input[self.cursor..to]);
        self.cursor = to;
    }

    /// Push a frame for a call returning to `return_address`.
    pub(crate) fn push_frame(&mut self, return_address: usize) {
        let kind = match self.frames.last() {
            Some(caller) if caller.labels == [0, 0] => FrameKind::Elided,
            _ => FrameKind::Full,
        };
        self.frames.push(Frame::new(kind, return_address));
    }

    /// Pop the top frame and return its return address.
    pub(crate) fn pop_frame(&mut self, at: usize) -> Result<usize, RuntimeError> {
        let frame = self
            .frames
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at })?;
        if frame.kind == FrameKind::Elided {
            if let Some(caller) = self.frames.last_mut() {
                caller.labels = [0, 0];
            }
        }
        Ok(frame.return_address)
    }

    /// Temporary label number for `slot`, allocating one on first use.
    pub(crate) fn temp_label(&mut self, slot: usize, at: usize) -> Result<u32, RuntimeError> {
        let frame = self
            .frames
            .last_mut()
            .ok_or(RuntimeError::StackUnderflow { at })?;
        if frame.labels[slot] == 0 {
            self.next_label += 1;
            frame.labels[slot] = self.next_label;
        }
        Ok(frame.labels[slot])
    }
}
