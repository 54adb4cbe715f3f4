//! Syntax tree of an LLVM assembly module.
//!
//! The tree is produced by the parser and consumed read-only by the
//! resolver. Identifiers stay unresolved (`Ident`); every node that can be
//! the subject of a diagnostic carries its `Span`.
//!
//! # Module Structure
//!
//! - `ty`: type expressions and `%name = type` definitions
//! - `constant`: constants and constant expressions
//! - `attrs`: parameter/function attributes and attribute groups
//! - `metadata`: metadata nodes, named metadata, attachments
//! - `inst`: blocks, instructions, terminators, operands
//! - `global`: comdats, globals, aliases, ifuncs, function headers,
//!   use-list orders

mod attrs;
mod constant;
mod global;
mod inst;
mod metadata;
mod ty;

pub use attrs::{AttrGroupDef, FuncAttr, ParamAttr};
pub use constant::{ConstExpr, FloatLit, ParsedConst, TypedConst};
pub use global::{
    ComdatDef, ComdatRef, FuncDef, FuncHeader, GlobalDecl, IndirectKind, IndirectSymbolDef,
    ParsedParam, UseListOrder, UseListOrderBb,
};
pub use inst::{
    CallSite, InlineAsm, InstKind, LabelRef, LandingPadClause, LocalDef, ParsedArg, ParsedBlock,
    ParsedInst, ParsedTerm, ParsedValue, PhiIncoming, SwitchCase, TermKind, TypedValue, ValueKind,
};
pub use metadata::{
    MdField, MdFieldValue, MdNode, MdOperand, MetadataAttachment, MetadataDef, MetadataRef,
    NamedMetadataDef, SpecializedNode,
};
pub use ty::{ParsedType, TypeDef, TypeDefBody};

use crate::{Name, Span};

/// One top-level entity, in source order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TopLevelEntity {
    SourceFilename(Name),
    DataLayout(Name),
    TargetTriple(Name),
    ModuleAsm(Name),
    TypeDef(TypeDef),
    Comdat(ComdatDef),
    Global(GlobalDecl),
    IndirectSymbol(IndirectSymbolDef),
    FuncDecl(FuncHeader),
    FuncDef(FuncDef),
    AttrGroup(AttrGroupDef),
    NamedMetadata(NamedMetadataDef),
    Metadata(MetadataDef),
    UseListOrder(UseListOrder),
    UseListOrderBb(UseListOrderBb),
}

impl TopLevelEntity {
    /// Span of the defining identifier, or `None` for header fields.
    pub fn span(&self) -> Option<Span> {
        match self {
            TopLevelEntity::SourceFilename(_)
            | TopLevelEntity::DataLayout(_)
            | TopLevelEntity::TargetTriple(_)
            | TopLevelEntity::ModuleAsm(_) => None,
            TopLevelEntity::TypeDef(def) => Some(def.span),
            TopLevelEntity::Comdat(def) => Some(def.span),
            TopLevelEntity::Global(def) => Some(def.span),
            TopLevelEntity::IndirectSymbol(def) => Some(def.span),
            TopLevelEntity::FuncDecl(header) => Some(header.span),
            TopLevelEntity::FuncDef(def) => Some(def.header.span),
            TopLevelEntity::AttrGroup(def) => Some(def.span),
            TopLevelEntity::NamedMetadata(def) => Some(def.span),
            TopLevelEntity::Metadata(def) => Some(def.span),
            TopLevelEntity::UseListOrder(order) => Some(order.span),
            TopLevelEntity::UseListOrderBb(order) => Some(order.span),
        }
    }
}

/// A parsed assembly file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub entities: Vec<TopLevelEntity>,
}

impl Module {
    pub fn new() -> Self {
        Module::default()
    }

    /// Function definitions in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDef> {
        self.entities.iter().filter_map(|entity| match entity {
            TopLevelEntity::FuncDef(def) => Some(def),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests;
