//! Command handlers for the `llr` CLI.
//!
//! Shared utilities like `read_file` and the lex/parse/resolve pipeline
//! live here in the module root.

use std::io::IsTerminal;

use llr_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use llr_diagnostic::Diagnostic;
use llr_ir::StringInterner;
use llr_module::Module;

use crate::cli::CommandArgs;

mod check;
mod debug;

pub use check::{check_file, print_file};
pub use debug::{lex_file, parse_file};

/// Read a source file, exiting with a message on failure.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Emit one diagnostic against `source` and exit.
fn report_and_exit(args: &CommandArgs, path: &str, source: &str, diagnostic: &Diagnostic) -> ! {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::with_color_mode(std::io::stderr(), args.color, is_tty)
        .with_source(path, source);
    emitter.emit(diagnostic);
    emitter.emit_summary(1);
    emitter.flush();
    std::process::exit(1);
}

/// Lex, parse and resolve `path`, reporting the first error and exiting if
/// any phase fails.
fn resolve_file(path: &str, args: &CommandArgs) -> (Module, StringInterner) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let tokens = llr_lexer::lex(&source, &interner);
    tracing::debug!(path, tokens = tokens.len(), parallel = args.parallel, "lexed");
    let ast = match llr_parse::parse(&tokens, &interner) {
        Ok(ast) => ast,
        Err(err) => report_and_exit(args, path, &source, &err.to_diagnostic()),
    };
    match llr_resolve::resolve_module(&ast, &interner, &args.resolve_options()) {
        Ok(module) => (module, interner),
        Err(err) => report_and_exit(args, path, &source, &err.into_diagnostic(&interner)),
    }
}
