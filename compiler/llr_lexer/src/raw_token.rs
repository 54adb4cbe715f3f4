//! Raw token definitions for the logos-based lexer.
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! interning. [`convert_token`](crate::convert::convert_token) turns it into
//! a `TokenKind`.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r";[^\n]*")]
    LineComment,

    // Sigiled identifiers
    #[regex(r"%[-a-zA-Z$._][-a-zA-Z$._0-9]*")]
    LocalName,
    #[regex(r#"%"[^"]*""#)]
    LocalQuoted,
    #[regex(r"%[0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    LocalId(u32),

    #[regex(r"@[-a-zA-Z$._][-a-zA-Z$._0-9]*")]
    GlobalName,
    #[regex(r#"@"[^"]*""#)]
    GlobalQuoted,
    #[regex(r"@[0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    GlobalId(u32),

    #[regex(r"\$[-a-zA-Z$._0-9]+")]
    ComdatName,
    #[regex(r#"\$"[^"]*""#)]
    ComdatQuoted,

    #[regex(r"![-a-zA-Z$._][-a-zA-Z$._0-9]*")]
    MetadataName,
    #[regex(r"![0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    MetadataId(u32),

    #[regex(r"#[0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    AttrGroupId(u32),

    // Block labels
    #[regex(r"[-a-zA-Z$._0-9]+:")]
    Label,
    #[regex(r#""[^"]*":"#)]
    LabelQuoted,

    // Bare words: keywords, types, opcodes
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*")]
    Word,

    // Literals
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i128>().ok())]
    Int(i128),
    #[regex(r"[-+]?[0-9]+\.[0-9]*([eE][-+]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),
    #[regex(r"0x[KLMHR]?[0-9A-Fa-f]+")]
    HexFloat,
    #[regex(r#""[^"]*""#)]
    String,
    #[regex(r#"c"[^"]*""#)]
    CharArray,

    // Punctuation
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token("*")]
    Star,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("!")]
    Exclaim,
    #[token("...")]
    Ellipsis,
    #[token("|")]
    Pipe,
}
