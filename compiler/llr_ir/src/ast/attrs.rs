//! Parameter, return and function attributes.

use super::ParsedType;
use crate::{Name, Span};

/// Attribute on a parameter, a return value or a call argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamAttr {
    /// `noalias`, `nonnull`, `zeroext`, ...
    Flag(Name),
    /// `align N`.
    Align(u64),
    /// `dereferenceable(N)`, `dereferenceable_or_null(N)`, `alignstack(N)`.
    Int { key: Name, value: u64 },
    /// `byval(T)`, `sret(T)`, `inalloca(T)`, `preallocated(T)`, `elementtype(T)`.
    Type { key: Name, ty: ParsedType },
    /// `"key"` or `"key"="value"`.
    Str { key: Name, value: Option<Name> },
}

/// Attribute on a function or call site.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FuncAttr {
    Flag(Name),
    /// `alignstack(N)`.
    Int { key: Name, value: u64 },
    Str { key: Name, value: Option<Name> },
    /// `#N` attribute group reference.
    Group { id: u32, span: Span },
}

/// `attributes #N = { ... }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AttrGroupDef {
    pub id: u32,
    pub span: Span,
    pub attrs: Vec<FuncAttr>,
}
