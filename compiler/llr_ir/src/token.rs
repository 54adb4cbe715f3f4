//! Token types produced by the lexer.

use super::{Name, Span};
use std::fmt;

/// A token and its source span.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds of LLVM assembly.
///
/// Keywords are not separate kinds: LLVM has hundreds of them and most are
/// only meaningful in one position, so bare words are interned as `Word`
/// and the parser matches on their text. Decimal floats keep their `f64`
/// bits so the kind stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Bare word: `define`, `i32`, `nuw`, `x`, `zeroinitializer`.
    Word(Name),
    /// `%name` or `%"quoted"`.
    LocalName(Name),
    /// `%7`.
    LocalId(u32),
    /// `@name` or `@"quoted"`.
    GlobalName(Name),
    /// `@0`.
    GlobalId(u32),
    /// `$name`.
    ComdatName(Name),
    /// `!name` (named metadata, attachment kinds).
    MetadataName(Name),
    /// `!3`.
    MetadataId(u32),
    /// `#0`.
    AttrGroupId(u32),
    /// `name:` at the start of a basic block.
    LabelName(Name),
    /// `3:` at the start of a basic block.
    LabelId(u32),
    /// Integer literal, sign included.
    Int(i128),
    /// Decimal floating literal, stored as `f64` bits.
    Float(u64),
    /// Hexadecimal floating literal text (`0x3FF0...`, `0xK4000...`).
    HexFloat(Name),
    /// String literal with escapes decoded.
    String(Name),
    /// `c"..."` contents with escapes still encoded.
    CharArray(Name),

    Eq,
    Comma,
    Star,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Less,
    Greater,
    Exclaim,
    Ellipsis,
    /// Joins debug-info flags: `DIFlagPublic | DIFlagVector`.
    Pipe,

    /// Unrecognised input.
    Error,
    Eof,
}

impl TokenKind {
    /// Short description for "expected X, found Y" messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Word(_) => "keyword",
            TokenKind::LocalName(_) | TokenKind::LocalId(_) => "local identifier",
            TokenKind::GlobalName(_) | TokenKind::GlobalId(_) => "global identifier",
            TokenKind::ComdatName(_) => "comdat name",
            TokenKind::MetadataName(_) => "metadata name",
            TokenKind::MetadataId(_) => "metadata ID",
            TokenKind::AttrGroupId(_) => "attribute group ID",
            TokenKind::LabelName(_) | TokenKind::LabelId(_) => "label",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) | TokenKind::HexFloat(_) => "floating-point literal",
            TokenKind::String(_) => "string literal",
            TokenKind::CharArray(_) => "character array",
            TokenKind::Eq => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Star => "`*`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::Exclaim => "`!`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Pipe => "`|`",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(n) => write!(f, "Word({n:?})"),
            TokenKind::LocalName(n) => write!(f, "LocalName({n:?})"),
            TokenKind::LocalId(id) => write!(f, "LocalId({id})"),
            TokenKind::GlobalName(n) => write!(f, "GlobalName({n:?})"),
            TokenKind::GlobalId(id) => write!(f, "GlobalId({id})"),
            TokenKind::ComdatName(n) => write!(f, "ComdatName({n:?})"),
            TokenKind::MetadataName(n) => write!(f, "MetadataName({n:?})"),
            TokenKind::MetadataId(id) => write!(f, "MetadataId({id})"),
            TokenKind::AttrGroupId(id) => write!(f, "AttrGroupId({id})"),
            TokenKind::LabelName(n) => write!(f, "LabelName({n:?})"),
            TokenKind::LabelId(id) => write!(f, "LabelId({id})"),
            TokenKind::Int(v) => write!(f, "Int({v})"),
            TokenKind::Float(bits) => write!(f, "Float({})", f64::from_bits(*bits)),
            TokenKind::HexFloat(n) => write!(f, "HexFloat({n:?})"),
            TokenKind::String(n) => write!(f, "String({n:?})"),
            TokenKind::CharArray(n) => write!(f, "CharArray({n:?})"),
            other => f.write_str(other.describe()),
        }
    }
}

/// Lexer output: tokens in source order, always ending with `Eof`.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
