//! CLI command implementations.

use std::fs;

use metaii_common::Program;
use metaii_vm::Outcome;

/// Assemble a program and report its size and any undefined labels.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: assemble requires a program file");
        eprintln!("Usage: metaii assemble <prog.asm>");
        return Err(1);
    }

    let path = &args[0];
    let program = read_program(path)?;

    for label in program.undefined_labels() {
        eprintln!("warning: undefined label '{label}'");
    }

    eprintln!(
        "assembled {} instructions, {} labels, start {} <- {path}",
        program.len(),
        program.labels.len(),
        program.start
    );
    Ok(())
}

/// Print the label table as `name<TAB>index`, ordered by index.
pub fn labels(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: labels requires a program file");
        eprintln!("Usage: metaii labels <prog.asm>");
        return Err(1);
    }

    let program = read_program(&args[0])?;
    let mut table: Vec<(&str, usize)> = program
        .labels
        .iter()
        .map(|(name, &index)| (name.as_str(), index))
        .collect();
    table.sort_by_key(|&(name, index)| (index, name));

    for (name, index) in table {
        println!("{name}\t{index}");
    }
    Ok(())
}

/// Print a program in canonical assembly form.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: disassemble requires a program file");
        eprintln!("Usage: metaii disassemble <prog.asm>");
        return Err(1);
    }

    let program = read_program(&args[0])?;
    print!("{}", metaii_assembler::disassemble(&program));
    Ok(())
}

/// Translate an input file with an assembled program.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.len() < 2 {
        eprintln!("error: run requires a program file and an input file");
        eprintln!("Usage: metaii run <prog.asm> <input> [-o output]");
        return Err(1);
    }

    let output = parse_output(&args[2..])?;
    let program = read_program(&args[0])?;
    let input = read_text(&args[1])?;

    match metaii_vm::run(&program, &input) {
        Ok(Outcome::Success(text)) => match output {
            Some(path) => {
                tracing::debug!(path, bytes = text.len(), "writing translation");
                fs::write(path, text).map_err(|e| {
                    eprintln!("error: cannot write '{path}': {e}");
                    1
                })
            }
            None => {
                print!("{text}");
                Ok(())
            }
        },
        Ok(outcome @ Outcome::Failure { .. }) => {
            eprintln!("{outcome}");
            Err(2)
        }
        Ok(Outcome::Continue) => {
            eprintln!("runtime error: translation stopped before the end of the program");
            Err(3)
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Parse the optional `-o <path>` tail of `run`.
fn parse_output(args: &[String]) -> Result<Option<&str>, i32> {
    match args {
        [] => Ok(None),
        [flag, path] if flag == "-o" => Ok(Some(path.as_str())),
        _ => {
            eprintln!("error: unexpected arguments: {}", args.join(" "));
            eprintln!("Usage: metaii run <prog.asm> <input> [-o output]");
            Err(1)
        }
    }
}

fn read_text(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })
}

/// Read and assemble a program file.
fn read_program(path: &str) -> Result<Program, i32> {
    let text = read_text(path)?;
    metaii_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {path}: {e}");
        1
    })
}
