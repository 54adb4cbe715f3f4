//! Module-level entities: comdats, globals, aliases, ifuncs, functions and
//! use-list orders.

use super::{
    FuncAttr, LabelRef, LocalDef, MetadataAttachment, ParamAttr, ParsedBlock, ParsedConst,
    ParsedType, TypedConst,
};
use crate::{CallingConv, ComdatKind, Ident, Name, Span, SymbolAttrs};

/// `$name = comdat kind`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ComdatDef {
    pub name: Name,
    pub span: Span,
    pub kind: ComdatKind,
}

/// Comdat reference on a global or function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ComdatRef {
    /// Bare `comdat`: the comdat named like the symbol itself.
    Implicit,
    Named { name: Name, span: Span },
}

/// Global variable declaration or definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GlobalDecl {
    pub ident: Ident,
    pub span: Span,
    pub attrs: SymbolAttrs,
    pub externally_initialized: bool,
    /// `constant` rather than `global`.
    pub constant: bool,
    pub content_ty: ParsedType,
    pub init: Option<(ParsedConst, Span)>,
    pub section: Option<Name>,
    pub comdat: Option<ComdatRef>,
    pub align: Option<u64>,
    pub metadata: Vec<MetadataAttachment>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IndirectKind {
    Alias,
    IFunc,
}

/// `@a = ... alias T, T* @x` or `@i = ... ifunc T, R* @resolver`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IndirectSymbolDef {
    pub ident: Ident,
    pub span: Span,
    pub kind: IndirectKind,
    pub attrs: SymbolAttrs,
    pub content_ty: ParsedType,
    pub target: TypedConst,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedParam {
    pub ty: ParsedType,
    pub attrs: Vec<ParamAttr>,
    pub ident: Option<LocalDef>,
}

/// Everything of a `declare` or `define` before the body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FuncHeader {
    pub ident: Ident,
    pub span: Span,
    pub attrs: SymbolAttrs,
    pub cconv: Option<CallingConv>,
    pub ret_attrs: Vec<ParamAttr>,
    pub ret_ty: ParsedType,
    pub params: Vec<ParsedParam>,
    pub variadic: bool,
    pub fn_attrs: Vec<FuncAttr>,
    pub section: Option<Name>,
    pub comdat: Option<ComdatRef>,
    pub align: Option<u64>,
    pub gc: Option<Name>,
    pub prefix: Option<TypedConst>,
    pub prologue: Option<TypedConst>,
    pub personality: Option<TypedConst>,
    pub metadata: Vec<MetadataAttachment>,
}

impl FuncHeader {
    /// The signature written by the header.
    pub fn signature(&self) -> ParsedType {
        ParsedType::Function {
            ret: Box::new(self.ret_ty.clone()),
            params: self.params.iter().map(|p| p.ty.clone()).collect(),
            variadic: self.variadic,
        }
    }
}

/// `define ... { blocks }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FuncDef {
    pub header: FuncHeader,
    pub blocks: Vec<ParsedBlock>,
}

/// `uselistorder i32* @g, { 1, 0 }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UseListOrder {
    pub value: TypedConst,
    pub indices: Vec<u32>,
    pub span: Span,
}

/// `uselistorder_bb @f, %bb, { 1, 0 }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UseListOrderBb {
    pub func: Ident,
    pub func_span: Span,
    pub block: LabelRef,
    pub indices: Vec<u32>,
    pub span: Span,
}
