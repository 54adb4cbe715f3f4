//! LLR Resolve - lowering of the syntax tree into a linked module
//!
//! Every identifier in an LLVM assembly module may refer forward, to
//! itself, or into a cycle: a global taking its own address, a struct
//! holding a pointer to itself, a phi naming a later block. The resolver
//! closes all of these with a two-phase skeleton/fill discipline per scope.
//!
//! # Module Structure
//!
//! - `ident_table`: collision-checked identifier tables, frozen per phase
//! - `types`: named type index/fill and type expression resolution
//! - `comdat`, `attrs`, `metadata`: flat module tables
//! - `globals`: global skeletons and bodies
//! - `constant`, `scope`: constant and operand resolution against the frozen scope
//! - `locals`: function bodies, implicit numbering and forward references
//! - `blockaddress`: late binding of `blockaddress` constants
//! - `uselist`: `uselistorder` and `uselistorder_bb`
//! - `builder`: the phase driver, [`resolve_module`]
//!
//! # Design Philosophy
//!
//! - **Skeletons before bodies**: a name is resolvable before it is filled
//! - **Result types before numbering**: `%N` assignment never sees an operand
//! - **Frozen tables**: nothing module-level mutates once bodies start

mod attrs;
mod blockaddress;
mod builder;
mod comdat;
mod constant;
mod error;
mod globals;
mod ident_table;
mod locals;
mod metadata;
mod options;
mod scope;
mod types;
mod uselist;

pub use builder::resolve_module;
pub use error::{ResolveError, Scope};
pub use ident_table::{FrozenTable, IdentTable};
pub use options::ResolveOptions;
