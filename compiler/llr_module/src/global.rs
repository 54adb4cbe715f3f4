//! Module-level symbols and comdats.

use llr_ir::{ComdatKind, Ident, Name, SymbolAttrs};

use crate::{ComdatId, Constant, Function, MetadataAttachment, TypeId};

/// `$name = comdat kind`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comdat {
    pub name: Name,
    pub kind: ComdatKind,
}

/// Any entity of the global namespace.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Global {
    pub ident: Ident,
    /// Always a pointer to the content or signature type.
    pub ty: TypeId,
    pub attrs: SymbolAttrs,
    pub metadata: Vec<MetadataAttachment>,
    pub kind: GlobalKind,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum GlobalKind {
    Variable(Variable),
    Alias(Indirect),
    IFunc(Indirect),
    Function(Box<Function>),
}

impl Global {
    pub fn as_function(&self) -> Option<&Function> {
        match &self.kind {
            GlobalKind::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match &self.kind {
            GlobalKind::Variable(var) => Some(var),
            _ => None,
        }
    }
}

/// `global` or `constant`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Variable {
    pub content_ty: TypeId,
    pub constant: bool,
    pub externally_initialized: bool,
    /// `None` for an external declaration.
    pub init: Option<Constant>,
    pub section: Option<Name>,
    pub comdat: Option<ComdatId>,
    pub align: Option<u64>,
}

/// Body of an alias (aliasee) or an ifunc (resolver).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Indirect {
    pub content_ty: TypeId,
    pub target: Constant,
}
