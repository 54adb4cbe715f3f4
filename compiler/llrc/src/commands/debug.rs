//! Debug commands: `lex` and `parse` for inspecting the front end.

use llr_ir::StringInterner;

use super::{read_file, report_and_exit};
use crate::cli::CommandArgs;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let tokens = llr_lexer::lex(&source, &interner);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for tok in tokens.iter() {
        let text = source.get(tok.span.to_range()).unwrap_or_default();
        println!("  {:?} @ {}  {text}", tok.kind, tok.span);
    }
}

/// Parse a file and dump its syntax tree.
pub fn parse_file(path: &str, args: &CommandArgs) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let tokens = llr_lexer::lex(&source, &interner);
    let module = match llr_parse::parse(&tokens, &interner) {
        Ok(module) => module,
        Err(err) => report_and_exit(args, path, &source, &err.to_diagnostic()),
    };

    println!("Parse result for '{path}':");
    println!("  Entities: {}", module.entities.len());
    println!("  Functions: {}", module.functions().count());
    println!();
    println!("{module:#?}");
}
