//! Resolved attributes.

use llr_ir::Name;

use crate::{AttrGroupId, TypeId};

/// Attribute on a parameter, a return value or a call argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamAttr {
    Flag(Name),
    Align(u64),
    Int { key: Name, value: u64 },
    Type { key: Name, ty: TypeId },
    Str { key: Name, value: Option<Name> },
}

/// Attribute on a function or call site.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FuncAttr {
    Flag(Name),
    Int { key: Name, value: u64 },
    Str { key: Name, value: Option<Name> },
    Group(AttrGroupId),
}

/// `attributes #N = { ... }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AttrGroup {
    pub number: u32,
    pub attrs: Vec<FuncAttr>,
}
