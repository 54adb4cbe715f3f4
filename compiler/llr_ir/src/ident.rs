//! Identifiers as written after a sigil (`%x`, `@0`, `$c`, `#1`, `!2`).

use crate::{Name, StringInterner};
use std::fmt;

/// An identifier in one of the assembly namespaces.
///
/// `Name` is an explicit name (`%entry`, `@"quoted name"`); `Id` is a
/// numeric identifier (`%3`, `@0`, `!7`). The sigil is not part of the
/// identifier: the namespace it belongs to is implied by where it occurs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Ident {
    Name(Name),
    Id(u32),
}

impl Ident {
    /// Render with a sigil, quoting names that are not bare identifiers.
    pub fn display<'a>(&'a self, sigil: char, interner: &'a StringInterner) -> IdentDisplay<'a> {
        IdentDisplay {
            ident: *self,
            sigil,
            interner,
        }
    }

    /// Owned rendering, used in error messages.
    pub fn to_text(self, sigil: char, interner: &StringInterner) -> String {
        self.display(sigil, interner).to_string()
    }
}

/// `Display` adapter returned by [`Ident::display`].
pub struct IdentDisplay<'a> {
    ident: Ident,
    sigil: char,
    interner: &'a StringInterner,
}

impl fmt::Display for IdentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ident {
            Ident::Id(id) => write!(f, "{}{id}", self.sigil),
            Ident::Name(name) => {
                let text = self.interner.lookup(name);
                if is_bare_name(text) {
                    write!(f, "{}{text}", self.sigil)
                } else {
                    write!(f, "{}\"", self.sigil)?;
                    write_escaped(f, text.as_bytes())?;
                    f.write_str("\"")
                }
            }
        }
    }
}

/// Whether `text` can be written without quotes: `[-a-zA-Z$._][-a-zA-Z$._0-9]*`.
pub fn is_bare_name(text: &str) -> bool {
    let mut bytes = text.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    let ident_byte = |b: u8| b.is_ascii_alphabetic() || matches!(b, b'-' | b'$' | b'.' | b'_');
    ident_byte(first) && bytes.all(|b| ident_byte(b) || b.is_ascii_digit())
}

/// Write string-literal contents, escaping `"`, `\` and non-printable
/// bytes as `\XX`.
pub fn write_escaped(f: &mut impl fmt::Write, bytes: &[u8]) -> fmt::Result {
    for &b in bytes {
        if b == b'"' || b == b'\\' || !(b' '..=b'~').contains(&b) {
            write!(f, "\\{b:02X}")?;
        } else {
            f.write_char(char::from(b))?;
        }
    }
    Ok(())
}

/// Decode `\XX` and `\\` escapes in string-literal contents.
///
/// Returns `None` for a malformed escape.
pub fn unescape(raw: &str) -> Option<Vec<u8>> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'\\') {
            out.push(b'\\');
            i += 2;
            continue;
        }
        let hex = raw.get(i + 1..i + 3)?;
        out.push(u8::from_str_radix(hex, 16).ok()?);
        i += 3;
    }
    Some(out)
}
