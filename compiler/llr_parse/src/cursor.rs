//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use crate::ParseError;
use llr_diagnostic::ErrorCode;
use llr_ir::{Ident, Span, StringInterner, Token, TokenKind, TokenList};

/// Cursor for navigating tokens.
///
/// Invariant: the position is always valid and the last token is `Eof`,
/// so `current()` never runs off the end.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Kind of the token `n` positions ahead; `Eof` past the end.
    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> &'a TokenKind {
        static EOF: TokenKind = TokenKind::Eof;
        self.tokens.get(self.pos + n).map_or(&EOF, |t| &t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Consume the current token. `Eof` is never consumed.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Check the current token kind, payload included.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Text of the current token if it is a bare word.
    #[inline]
    pub fn current_word(&self) -> Option<&'a str> {
        Self::word_text(self.current_kind(), self.interner)
    }

    /// Text of the token `n` ahead if it is a bare word.
    pub fn peek_word_at(&self, n: usize) -> Option<&'a str> {
        Self::word_text(self.peek_kind_at(n), self.interner)
    }

    fn word_text(kind: &TokenKind, interner: &'a StringInterner) -> Option<&'a str> {
        match kind {
            TokenKind::Word(name) => Some(interner.lookup(*name)),
            _ => None,
        }
    }

    #[inline]
    pub fn check_word(&self, word: &str) -> bool {
        self.current_word() == Some(word)
    }

    /// Consume `kind` if present.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the word `word` if present.
    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    pub fn expect_word(&mut self, word: &str) -> Result<Span, ParseError> {
        if self.check_word(word) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("`{word}`")))
        }
    }

    /// Consume a `%` identifier.
    pub fn expect_local(&mut self) -> Result<(Ident, Span), ParseError> {
        let ident = match self.current_kind() {
            TokenKind::LocalName(name) => Ident::Name(*name),
            TokenKind::LocalId(id) => Ident::Id(*id),
            _ => return Err(self.unexpected("local identifier")),
        };
        Ok((ident, self.advance().span))
    }

    /// Consume an `@` identifier.
    pub fn expect_global(&mut self) -> Result<(Ident, Span), ParseError> {
        let ident = match self.current_kind() {
            TokenKind::GlobalName(name) => Ident::Name(*name),
            TokenKind::GlobalId(id) => Ident::Id(*id),
            _ => return Err(self.unexpected("global identifier")),
        };
        Ok((ident, self.advance().span))
    }

    pub fn expect_string(&mut self) -> Result<llr_ir::Name, ParseError> {
        match self.current_kind() {
            TokenKind::String(name) => {
                self.advance();
                Ok(*name)
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    /// Consume an integer literal that fits `T`.
    pub fn expect_int<T: TryFrom<i128>>(&mut self) -> Result<T, ParseError> {
        match self.current_kind() {
            TokenKind::Int(value) => {
                let span = self.current_span();
                let converted = T::try_from(*value).map_err(|_| {
                    ParseError::new(
                        ErrorCode::E1004,
                        format!("integer literal {value} is out of range"),
                        span,
                    )
                })?;
                self.advance();
                Ok(converted)
            }
            _ => Err(self.unexpected("integer literal")),
        }
    }

    /// Build an "expected X, found Y" error at the current token.
    #[cold]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let current = self.current();
        if matches!(current.kind, TokenKind::Error) {
            return ParseError::new(ErrorCode::E0001, "invalid token", current.span);
        }
        let found = match self.current_word() {
            Some(word) => format!("`{word}`"),
            None => current.kind.describe().to_string(),
        };
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found {found}"),
            current.span,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(interner: &StringInterner, words: &[&str]) -> TokenList {
        let mut list = TokenList::new();
        for (i, word) in words.iter().enumerate() {
            let start = u32::try_from(i * 4).unwrap_or(0);
            list.push(Token::new(
                TokenKind::Word(interner.intern(word)),
                Span::new(start, start + 3),
            ));
        }
        list.push(Token::new(TokenKind::Eof, Span::point(100)));
        list
    }

    #[test]
    fn test_words_and_eof() {
        let interner = StringInterner::new();
        let list = tokens(&interner, &["ret", "void"]);
        let mut cursor = Cursor::new(&list, &interner);
        assert!(cursor.eat_word("ret"));
        assert!(!cursor.eat_word("ret"));
        assert_eq!(cursor.peek_word_at(0), Some("void"));
        assert_eq!(cursor.expect_word("void").ok(), Some(Span::new(4, 7)));
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous_span(), Span::new(4, 7));
    }

    #[test]
    fn test_unexpected_message() {
        let interner = StringInterner::new();
        let list = tokens(&interner, &["store"]);
        let cursor = Cursor::new(&list, &interner);
        let err = cursor.unexpected("`=`");
        assert_eq!(err.code, ErrorCode::E1001);
        assert_eq!(err.message, "expected `=`, found `store`");
    }
}
