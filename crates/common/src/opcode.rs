//! Opcode definitions for the META II machine.
//!
//! The instruction set is closed: three families of operations sharing one
//! condition flag (the "switch") and one call stack.

/// Identifies the operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Input matching
    /// Test for a literal string at the input cursor.
    Tst,
    /// Match an identifier: a letter followed by letters or digits.
    Id,
    /// Match a number: digits, optionally dotted (`1.2.3`).
    Num,
    /// Match a single-quoted string, quotes included.
    Sr,

    // Control flow
    /// Call the subroutine at the target.
    Cll,
    /// Return from the current subroutine.
    R,
    /// Set the switch unconditionally.
    Set,
    /// Branch unconditionally.
    B,
    /// Branch if the switch is set.
    Bt,
    /// Branch if the switch is reset.
    Bf,
    /// Halt with a match failure if the switch is reset.
    Be,

    // Output generation
    /// Copy a literal to the output line.
    Cl,
    /// Copy the last matched input text to the output line.
    Ci,
    /// Generate (or reuse) temporary label 1 and copy it to the output line.
    Gn1,
    /// Generate (or reuse) temporary label 2 and copy it to the output line.
    Gn2,
    /// Mark the next output line as starting with a label.
    Lb,
    /// Flush the output line.
    Out,
}

/// What an opcode expects as its single operand, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    /// No operand.
    None,
    /// A literal string (quoted or bare).
    Text,
    /// A branch target: a label name or an absolute address.
    Target,
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 17] = [
    Opcode::Tst,
    Opcode::Id,
    Opcode::Num,
    Opcode::Sr,
    Opcode::Cll,
    Opcode::R,
    Opcode::Set,
    Opcode::B,
    Opcode::Bt,
    Opcode::Bf,
    Opcode::Be,
    Opcode::Cl,
    Opcode::Ci,
    Opcode::Gn1,
    Opcode::Gn2,
    Opcode::Lb,
    Opcode::Out,
];

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Tst => "tst",
            Opcode::Id => "id",
            Opcode::Num => "num",
            Opcode::Sr => "sr",
            Opcode::Cll => "cll",
            Opcode::R => "r",
            Opcode::Set => "set",
            Opcode::B => "b",
            Opcode::Bt => "bt",
            Opcode::Bf => "bf",
            Opcode::Be => "be",
            Opcode::Cl => "cl",
            Opcode::Ci => "ci",
            Opcode::Gn1 => "gn1",
            Opcode::Gn2 => "gn2",
            Opcode::Lb => "lb",
            Opcode::Out => "out",
        }
    }

    /// Look up an opcode by mnemonic.
    ///
    /// Matching ignores ASCII case, which admits upper-case listings
    /// (`TST`, `GN1`). Spellings outside the table still yield `None`.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
            .copied()
    }

    /// The operand this opcode takes.
    pub fn operand_shape(&self) -> OperandShape {
        match self {
            Opcode::Tst | Opcode::Cl => OperandShape::Text,
            Opcode::Cll | Opcode::B | Opcode::Bt | Opcode::Bf => OperandShape::Target,
            Opcode::Id
            | Opcode::Num
            | Opcode::Sr
            | Opcode::R
            | Opcode::Set
            | Opcode::Be
            | Opcode::Ci
            | Opcode::Gn1
            | Opcode::Gn2
            | Opcode::Lb
            | Opcode::Out => OperandShape::None,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics_are_unique() {
        for (i, a) in ALL_OPCODES.iter().enumerate() {
            for b in &ALL_OPCODES[i + 1..] {
                assert_ne!(a.mnemonic(), b.mnemonic());
            }
        }
    }

    #[test]
    fn lookup_every_mnemonic() {
        for &opcode in &ALL_OPCODES {
            assert_eq!(Opcode::from_mnemonic(opcode.mnemonic()), Some(opcode));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Opcode::from_mnemonic("TST"), Some(Opcode::Tst));
        assert_eq!(Opcode::from_mnemonic("Gn1"), Some(Opcode::Gn1));
    }

    #[test]
    fn lookup_rejects_pseudo_ops_and_unknowns() {
        assert_eq!(Opcode::from_mnemonic("adr"), None);
        assert_eq!(Opcode::from_mnemonic("end"), None);
        assert_eq!(Opcode::from_mnemonic("halt"), None);
        assert_eq!(Opcode::from_mnemonic(""), None);
    }

    #[test]
    fn operand_shapes() {
        assert_eq!(Opcode::Tst.operand_shape(), OperandShape::Text);
        assert_eq!(Opcode::Cl.operand_shape(), OperandShape::Text);
        assert_eq!(Opcode::Cll.operand_shape(), OperandShape::Target);
        assert_eq!(Opcode::Bf.operand_shape(), OperandShape::Target);
        assert_eq!(Opcode::Be.operand_shape(), OperandShape::None);
        assert_eq!(Opcode::Out.operand_shape(), OperandShape::None);
    }

    #[test]
    fn display_is_mnemonic() {
        assert_eq!(Opcode::Gn2.to_string(), "gn2");
    }
}
