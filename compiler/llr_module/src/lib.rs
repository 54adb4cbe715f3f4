//! LLR Module - the resolved LLVM IR object graph
//!
//! Output of `llr_resolve`: every identifier of the source has been
//! replaced by an arena handle, so forward, self and mutual references are
//! plain indices.
//!
//! # Module Structure
//!
//! - `ids`: `u32` handles into the arenas
//! - `types`: hash-consed `TypePool`
//! - `constant`, `value`, `attrs`: operand-level data
//! - `metadata`: metadata nodes and use-list orders
//! - `inst`, `function`, `global`: entities
//! - `module`: the `Module` aggregate
//! - `print`: canonical text output
//!
//! # Design Philosophy
//!
//! - **Arenas, not pointers**: cyclic graphs without `Rc` or interior mutability
//! - **Type identity is handle identity**: structurally equal types share a `TypeId`

mod attrs;
mod constant;
mod function;
mod global;
mod ids;
mod inst;
mod metadata;
mod module;
pub mod print;
mod types;
mod value;

pub use attrs::{AttrGroup, FuncAttr, ParamAttr};
pub use constant::{ConstExpr, Constant, FloatValue};
pub use function::{BasicBlock, Function, FunctionBody, Param};
pub use global::{Comdat, Global, GlobalKind, Indirect, Variable};
pub use ids::{
    next_raw, AttrGroupId, BlockAddressId, BlockId, ComdatId, GlobalId, InstId, MetadataId,
    TypeId,
};
pub use inst::{CallArg, CallInst, InstKind, Instruction, TermKind, Terminator};
pub use metadata::{
    BlockAddress, MdField, MdFieldValue, MdNode, MetadataAttachment, MetadataNode, NamedMetadata,
    SpecializedNode, UseListOrder, UseListOrderBb,
};
pub use module::Module;
pub use types::{NamedBody, Type, TypeInternError, TypePool};
pub use value::{LocalIdent, LocalRef, MdOperand, Value};

llr_ir::static_assert_size!(TypeId, 4);
llr_ir::static_assert_size!(LocalRef, 8);
