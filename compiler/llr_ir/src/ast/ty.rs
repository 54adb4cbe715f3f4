//! Types as written in the source.

use crate::{FloatKind, Ident, Span};

/// A type expression before resolution.
///
/// `Named` keeps the identifier; the resolver maps it to the pool handle of
/// the named type without looking at the body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedType {
    Void,
    Int(u32),
    Float(FloatKind),
    Label,
    Metadata,
    Token,
    Mmx,
    Pointer {
        elem: Box<ParsedType>,
        addr_space: u32,
    },
    Array {
        len: u64,
        elem: Box<ParsedType>,
    },
    Vector {
        len: u32,
        elem: Box<ParsedType>,
        scalable: bool,
    },
    Struct {
        fields: Vec<ParsedType>,
        packed: bool,
    },
    Function {
        ret: Box<ParsedType>,
        params: Vec<ParsedType>,
        variadic: bool,
    },
    Named {
        ident: Ident,
        span: Span,
    },
}

impl ParsedType {
    /// `T*` in address space zero.
    pub fn pointer_to(elem: ParsedType) -> Self {
        ParsedType::Pointer {
            elem: Box::new(elem),
            addr_space: 0,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ParsedType::Void)
    }
}

/// `%name = type ...`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDef {
    pub ident: Ident,
    pub span: Span,
    pub body: TypeDefBody,
}

/// Body of a type definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeDefBody {
    Opaque,
    Type(ParsedType),
}
