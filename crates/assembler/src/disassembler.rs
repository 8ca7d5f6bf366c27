//! Disassembler: program → canonical assembly text.
//!
//! Output format: an `adr` line with the numeric start index, then one line
//! per instruction indented by a tab, each preceded by the labels bound to
//! it in column 0, and a closing `end`.

use metaii_common::Program;

/// Disassemble a program into canonical assembly text.
///
/// For any program produced by the assembler the output reassembles to an
/// identical program. Labels bound past the last instruction are written
/// after it, in index order.
pub fn disassemble(program: &Program) -> String {
    let mut out = format!("\tadr {}\n", program.start);

    for (index, instr) in program.instructions.iter().enumerate() {
        for label in program.labels_at(index) {
            out.push_str(label);
            out.push('\n');
        }
        out.push('\t');
        out.push_str(&instr.to_string());
        out.push('\n');
    }

    let mut trailing: Vec<(&String, &usize)> = program
        .labels
        .iter()
        .filter(|(_, &index)| index >= program.len())
        .collect();
    trailing.sort_by_key(|&(name, &index)| (index, name));
    for (label, _) in trailing {
        out.push_str(label);
        out.push('\n');
    }

    out.push_str("\tend\n");
    out
}
