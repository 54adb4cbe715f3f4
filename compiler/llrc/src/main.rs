//! LLR command line driver.
//!
//! Lexes, parses, resolves and prints LLVM assembly files.

mod cli;
mod commands;
mod tracing_setup;

use cli::CommandArgs;
use commands::{check_file, lex_file, parse_file, print_file};

fn main() {
    tracing_setup::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    match command {
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("llr {}", env!("CARGO_PKG_VERSION"));
        }
        "lex" | "parse" | "check" | "print" => {
            let parsed = match CommandArgs::parse(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            let Some(path) = parsed.path.clone() else {
                eprintln!("error: missing file path");
                eprintln!("Usage: llr {command} <file.ll>");
                std::process::exit(1);
            };
            match command {
                "lex" => lex_file(&path),
                "parse" => parse_file(&path, &parsed),
                "check" => check_file(&path, &parsed),
                _ => print_file(&path, &parsed),
            }
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("LLR: LLVM assembly resolver");
    println!();
    println!("Usage: llr <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file.ll>        Tokenize and display tokens");
    println!("  parse <file.ll>      Parse and display the syntax tree");
    println!("  check <file.ll>      Resolve and report the first error");
    println!("  print <file.ll>      Resolve and print canonical assembly");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --parallel           Resolve function bodies in parallel");
    println!("  -o <path>            Write `print` output to a file");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing, e.g. RUST_LOG=llr_resolve=debug");
    println!("  LLR_LOG_TREE         Show tracing spans as a tree");
    println!();
    println!("Examples:");
    println!("  llr check main.ll");
    println!("  llr print main.ll --parallel -o canonical.ll");
}
