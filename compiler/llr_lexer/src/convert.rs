//! Token Conversion
//!
//! Converts raw logos tokens to final `TokenKind` with string interning.

use llr_ir::{unescape, StringInterner, TokenKind};

use crate::raw_token::RawToken;

/// Intern the decoded contents of a quoted slice (`"..."` without quotes).
///
/// Returns `None` when an escape is malformed.
fn intern_quoted(content: &str, interner: &StringInterner) -> Option<llr_ir::Name> {
    let bytes = unescape(content)?;
    Some(interner.intern(&String::from_utf8_lossy(&bytes)))
}

/// Text between the first and the last double quote of `slice`.
fn between_quotes(slice: &str) -> &str {
    let start = slice.find('"').map_or(0, |i| i + 1);
    let end = slice.rfind('"').unwrap_or(slice.len());
    slice.get(start..end).unwrap_or("")
}

/// Convert a raw token to a `TokenKind`, interning strings.
pub(crate) fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    let quoted = || intern_quoted(between_quotes(slice), interner);
    let converted = match raw {
        RawToken::LocalName => Some(TokenKind::LocalName(interner.intern(&slice[1..]))),
        RawToken::LocalQuoted => quoted().map(TokenKind::LocalName),
        RawToken::LocalId(id) => Some(TokenKind::LocalId(id)),
        RawToken::GlobalName => Some(TokenKind::GlobalName(interner.intern(&slice[1..]))),
        RawToken::GlobalQuoted => quoted().map(TokenKind::GlobalName),
        RawToken::GlobalId(id) => Some(TokenKind::GlobalId(id)),
        RawToken::ComdatName => Some(TokenKind::ComdatName(interner.intern(&slice[1..]))),
        RawToken::ComdatQuoted => quoted().map(TokenKind::ComdatName),
        RawToken::MetadataName => Some(TokenKind::MetadataName(interner.intern(&slice[1..]))),
        RawToken::MetadataId(id) => Some(TokenKind::MetadataId(id)),
        RawToken::AttrGroupId(id) => Some(TokenKind::AttrGroupId(id)),
        RawToken::Label => {
            let text = &slice[..slice.len() - 1];
            if text.bytes().all(|b| b.is_ascii_digit()) {
                text.parse().ok().map(TokenKind::LabelId)
            } else {
                Some(TokenKind::LabelName(interner.intern(text)))
            }
        }
        RawToken::LabelQuoted => quoted().map(TokenKind::LabelName),
        RawToken::Word => Some(TokenKind::Word(interner.intern(slice))),
        RawToken::Int(value) => Some(TokenKind::Int(value)),
        RawToken::Float(value) => Some(TokenKind::Float(value.to_bits())),
        RawToken::HexFloat => Some(TokenKind::HexFloat(interner.intern(slice))),
        RawToken::String => quoted().map(TokenKind::String),
        // Char arrays keep their escapes; the parser decodes them to bytes.
        RawToken::CharArray => Some(TokenKind::CharArray(interner.intern(between_quotes(slice)))),
        RawToken::Eq => Some(TokenKind::Eq),
        RawToken::Comma => Some(TokenKind::Comma),
        RawToken::Star => Some(TokenKind::Star),
        RawToken::LParen => Some(TokenKind::LParen),
        RawToken::RParen => Some(TokenKind::RParen),
        RawToken::LBracket => Some(TokenKind::LBracket),
        RawToken::RBracket => Some(TokenKind::RBracket),
        RawToken::LBrace => Some(TokenKind::LBrace),
        RawToken::RBrace => Some(TokenKind::RBrace),
        RawToken::Less => Some(TokenKind::Less),
        RawToken::Greater => Some(TokenKind::Greater),
        RawToken::Exclaim => Some(TokenKind::Exclaim),
        RawToken::Ellipsis => Some(TokenKind::Ellipsis),
        RawToken::Pipe => Some(TokenKind::Pipe),
        RawToken::LineComment => None,
    };
    converted.unwrap_or(TokenKind::Error)
}
