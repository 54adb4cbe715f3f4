//! Operands and local identifiers.

use llr_ir::ast::InlineAsm;
use llr_ir::{Ident, Name};

use crate::{BlockId, Constant, InstId, MetadataId, SpecializedNode, TypeId};

/// Identifier of a local entity after numbering.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LocalIdent {
    /// No name and no number: a void value, or a skeleton not yet numbered.
    Unnamed,
    Named(Name),
    Id(u32),
}

impl LocalIdent {
    /// The identifier this entity is registered under, if any.
    pub fn to_ident(self) -> Option<Ident> {
        match self {
            LocalIdent::Unnamed => None,
            LocalIdent::Named(name) => Some(Ident::Name(name)),
            LocalIdent::Id(id) => Some(Ident::Id(id)),
        }
    }
}

/// The local entity an operand refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum LocalRef {
    /// Parameter by position.
    Param(u32),
    Block(BlockId),
    Inst(InstId),
    /// Result of the terminator (an `invoke`) of a block.
    Term(BlockId),
}

/// An instruction operand.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    Local { local: LocalRef, ty: TypeId },
    Const(Constant),
    /// Inline assembly callee; `ty` is a pointer to the call's function type.
    InlineAsm { ty: TypeId, asm: InlineAsm },
    /// Operand of type `metadata`.
    Metadata(MdOperand),
}

impl Value {
    pub fn ty(&self) -> TypeId {
        match self {
            Value::Local { ty, .. } | Value::InlineAsm { ty, .. } => *ty,
            Value::Const(constant) => constant.ty(),
            Value::Metadata(_) => TypeId::METADATA,
        }
    }

    pub fn as_local(&self) -> Option<LocalRef> {
        match self {
            Value::Local { local, .. } => Some(*local),
            _ => None,
        }
    }
}

/// One operand of a metadata tuple.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MdOperand {
    Null,
    Node(MetadataId),
    String(Name),
    Value(Box<Value>),
    Tuple(Vec<MdOperand>),
    Specialized(Box<SpecializedNode>),
}
