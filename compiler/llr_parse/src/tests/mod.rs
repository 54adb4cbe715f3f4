//! Parser tests.
//!
//! - `parser`: well-formed modules, one test per syntactic category
//! - `errors`: error codes, spans and contexts of malformed input

mod errors;
mod parser;

use crate::{parse, ParseError};
use llr_ir::{ast::Module, StringInterner};

fn parse_source(source: &str) -> (Result<Module, ParseError>, StringInterner) {
    let interner = StringInterner::new();
    let tokens = llr_lexer::lex(source, &interner);
    (parse(&tokens, &interner), interner)
}
