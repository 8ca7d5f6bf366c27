//! Line scanner for META II assembly text.
//!
//! Column 0 decides what a line is: a non-blank first character starts a
//! label definition, a blank one starts a statement.

use crate::error::AsmError;
use metaii_common::Operand;

/// One classified line of assembly text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceLine {
    /// Empty or whitespace-only.
    Blank,
    /// A label definition; the trimmed line text.
    Label(String),
    /// A mnemonic followed by its operands.
    Statement {
        mnemonic: String,
        operands: Vec<Operand>,
    },
}

/// ASCII whitespace, vertical tab included.
pub(crate) fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Classify and tokenize a single line of assembly text.
pub(crate) fn scan_line(line: &str, line_num: usize) -> Result<SourceLine, AsmError> {
    if line.chars().all(is_blank) {
        return Ok(SourceLine::Blank);
    }

    if !line.starts_with(is_blank) {
        return Ok(SourceLine::Label(line.trim_matches(is_blank).to_string()));
    }

    let body = line.trim_start_matches(is_blank);
    let split = body.find(is_blank).unwrap_or(body.len());
    let mnemonic = body[..split].to_string();
    let operands = scan_operands(&body[split..], line_num, line)?;

    Ok(SourceLine::Statement { mnemonic, operands })
}

/// Split the text after a mnemonic into operands.
///
/// `'...'` is a literal and may contain whitespace. A word starting with a
/// digit must be an unsigned integer. Anything else is a symbol.
fn scan_operands(text: &str, line_num: usize, raw: &str) -> Result<Vec<Operand>, AsmError> {
    let mut operands = Vec::new();
    let mut rest = text.trim_start_matches(is_blank);

    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('\'') {
            let close = quoted
                .find('\'')
                .ok_or_else(|| AsmError::UnterminatedString {
                    line: line_num,
                    text: raw.to_string(),
                })?;
            operands.push(Operand::Literal(quoted[..close].to_string()));
            rest = &quoted[close + 1..];
        } else {
            let end = rest.find(is_blank).unwrap_or(rest.len());
            let word = &rest[..end];
            let operand = if word.starts_with(|c: char| c.is_ascii_digit()) {
                let value = word.parse().map_err(|_| AsmError::InvalidNumber {
                    line: line_num,
                    token: word.to_string(),
                })?;
                Operand::Integer(value)
            } else {
                Operand::Symbol(word.to_string())
            };
            operands.push(operand);
            rest = &rest[end..];
        }
        rest = rest.trim_start_matches(is_blank);
    }

    Ok(operands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(mnemonic: &str, operands: Vec<Operand>) -> SourceLine {
        SourceLine::Statement {
            mnemonic: mnemonic.to_string(),
            operands,
        }
    }

    #[test]
    fn empty_line() {
        assert_eq!(scan_line("", 1).unwrap(), SourceLine::Blank);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(scan_line("   \t  ", 1).unwrap(), SourceLine::Blank);
    }

    #[test]
    fn label_in_column_zero() {
        assert_eq!(
            scan_line("EXPR", 1).unwrap(),
            SourceLine::Label("EXPR".to_string())
        );
    }

    #[test]
    fn label_is_trimmed() {
        assert_eq!(
            scan_line("A01  \t", 1).unwrap(),
            SourceLine::Label("A01".to_string())
        );
    }

    #[test]
    fn bare_opcode() {
        assert_eq!(scan_line("\tout", 1).unwrap(), statement("out", vec![]));
    }

    #[test]
    fn leading_spaces_start_statement() {
        assert_eq!(scan_line("    r", 1).unwrap(), statement("r", vec![]));
    }

    #[test]
    fn quoted_literal_keeps_inner_whitespace() {
        assert_eq!(
            scan_line("\tcl 'load  '", 1).unwrap(),
            statement("cl", vec![Operand::Literal("load  ".to_string())])
        );
    }

    #[test]
    fn symbol_operand() {
        assert_eq!(
            scan_line("\tcll EX1", 1).unwrap(),
            statement("cll", vec![Operand::Symbol("EX1".to_string())])
        );
    }

    #[test]
    fn integer_operand() {
        assert_eq!(
            scan_line("\tadr 12", 1).unwrap(),
            statement("adr", vec![Operand::Integer(12)])
        );
    }

    #[test]
    fn several_operands() {
        assert_eq!(
            scan_line("\tb L1 'x y' 3", 1).unwrap(),
            statement(
                "b",
                vec![
                    Operand::Symbol("L1".to_string()),
                    Operand::Literal("x y".to_string()),
                    Operand::Integer(3),
                ]
            )
        );
    }

    #[test]
    fn unterminated_literal() {
        let err = scan_line("\ttst 'abc", 4).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnterminatedString {
                line: 4,
                text: "\ttst 'abc".to_string()
            }
        );
    }

    #[test]
    fn invalid_number() {
        let err = scan_line("\tb 12ab", 5).unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidNumber {
                line: 5,
                token: "12ab".to_string()
            }
        );
    }

    #[test]
    fn vertical_tab_is_blank() {
        assert!(is_blank('\x0b'));
        assert_eq!(scan_line("\x0bset", 1).unwrap(), statement("set", vec![]));
    }
}
