//! META II CLI — assemble, inspect, and run translators.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage/read/write/assembly error
//! - 2: Input rejected by the translator (syntax error)
//! - 3: Runtime error

mod commands;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "assemble" => commands::assemble(&args[2..]),
        "labels" => commands::labels(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "run" => commands::run(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: metaii <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  assemble <prog.asm>                      Check a program and report its size");
    eprintln!("  labels <prog.asm>                        Print the label table");
    eprintln!("  disassemble <prog.asm>                   Print the program in canonical form");
    eprintln!("  run <prog.asm> <input> [-o output]       Translate an input file");
}
