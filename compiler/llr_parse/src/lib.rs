//! Recursive descent parser for LLVM assembly.
//!
//! Produces an [`ast::Module`](llr_ir::ast::Module) from the lexer's token
//! list. The parser is purely syntactic: identifiers are kept as written
//! and every cross-reference is left to `llr_resolve`. Parsing stops at the
//! first error.
//!
//! # Module Structure
//!
//! - `cursor`: token navigation and `expect_*` helpers
//! - `error`: `ParseError` and `ErrorContext`
//! - `grammar`: one submodule per syntactic category

mod cursor;
mod error;
mod grammar;

pub use error::{ErrorContext, ParseError};

use cursor::Cursor;
use llr_ir::{ast, Span, StringInterner, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
        }
    }

    /// Run `f`, tagging any error it returns with `context`.
    ///
    /// The innermost context is kept: an error raised inside an
    /// instruction reports "an instruction", not "a function body".
    pub(crate) fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|err| err.with_context(context))
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}

/// Parse a token list into a module.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<ast::Module, ParseError> {
    let mut parser = Parser::new(tokens, interner);
    let module = parser.parse_module();
    if let Err(err) = &module {
        tracing::debug!(code = %err.code, span = ?err.span, "parse failed");
    }
    module
}

#[cfg(test)]
mod tests;
