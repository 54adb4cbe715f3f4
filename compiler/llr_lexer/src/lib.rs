//! Lexer for LLVM assembly using logos with string interning.
//!
//! Keywords are not separate token kinds: every bare word becomes
//! `TokenKind::Word` and the parser matches on its text. Quoted names and
//! string literals are decoded here; `c"..."` arrays keep their escapes.
//! Input the lexer does not recognise becomes a `TokenKind::Error` token.

mod convert;
mod raw_token;

use llr_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;

use convert::convert_token;
use raw_token::RawToken;

/// Lex source text into a `TokenList` ending with `Eof`.
///
/// # Panics
/// Panics if the source exceeds `u32::MAX` bytes.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        match token_result {
            Ok(RawToken::LineComment) => {}
            Ok(raw) => {
                let kind = convert_token(raw, logos.slice(), interner);
                result.push(Token::new(kind, span));
            }
            Err(()) => result.push(Token::new(TokenKind::Error, span)),
        }
    }

    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    result.push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    result
}

#[cfg(test)]
mod tests;
