//! LLR IR - syntax-level types for LLVM assembly
//!
//! This crate contains the data structures shared by the lexer, the parser
//! and the resolver:
//! - Spans for source locations
//! - Names for interned identifiers, keywords and string literals
//! - `Ident`, the unresolved form of `%x`, `@0`, `!3`
//! - Tokens and `TokenList` for lexer output
//! - Keyword enums (linkage, opcodes, predicates, orderings)
//! - The syntax tree in [`ast`]
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings are `Name(u32)`, compared by value
//! - **Parse, Don't Resolve**: the tree keeps identifiers as written; all
//!   cross-references are established by `llr_resolve`
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod enums;
mod ident;
mod interner;
mod name;
mod span;
mod token;

pub use enums::{
    ArithFlags, AtomicOp, AtomicOrdering, BinaryOp, CallingConv, CastOp, ClauseKind, ComdatKind,
    DllStorage, FastMathFlags, FloatKind, FloatPredicate, IntPredicate, Linkage, Preemption,
    SymbolAttrs, TailKind, ThreadLocal, TlsModel, UnnamedAddr, Visibility,
};
pub use ident::{is_bare_name, unescape, write_escaped, Ident, IdentDisplay};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};

static_assert_size!(Span, 8);
static_assert_size!(Name, 4);
static_assert_size!(Ident, 8);
