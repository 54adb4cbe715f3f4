//! Constants and constant expressions.

use super::ParsedType;
use crate::{ArithFlags, BinaryOp, CastOp, FloatPredicate, Ident, IntPredicate, Name, Span};

/// A floating literal as written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FloatLit {
    /// Decimal text, parsed to `f64` bits.
    Decimal(u64),
    /// `0x...` text including any kind prefix (`0xK`, `0xM`, ...).
    Hex(Name),
}

/// A constant whose type comes from context.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedConst {
    Int(i128),
    Bool(bool),
    Float(FloatLit),
    Null,
    Undef,
    Poison,
    ZeroInitializer,
    /// The `none` token constant.
    None,
    Array(Vec<TypedConst>),
    /// `c"..."` contents, escapes decoded.
    CharArray(Vec<u8>),
    Struct {
        fields: Vec<TypedConst>,
        packed: bool,
    },
    Vector(Vec<TypedConst>),
    Global(Ident),
    BlockAddress {
        func: Ident,
        block: Ident,
    },
    Expr(Box<ConstExpr>),
}

/// A constant with its written type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypedConst {
    pub ty: ParsedType,
    pub value: ParsedConst,
    pub span: Span,
}

/// Constant expressions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstExpr {
    Gep {
        inbounds: bool,
        source: ParsedType,
        base: TypedConst,
        indices: Vec<TypedConst>,
    },
    Cast {
        op: CastOp,
        value: TypedConst,
        to: ParsedType,
    },
    Binary {
        op: BinaryOp,
        flags: ArithFlags,
        lhs: TypedConst,
        rhs: TypedConst,
    },
    ICmp {
        pred: IntPredicate,
        lhs: TypedConst,
        rhs: TypedConst,
    },
    FCmp {
        pred: FloatPredicate,
        lhs: TypedConst,
        rhs: TypedConst,
    },
    Select {
        cond: TypedConst,
        then: TypedConst,
        otherwise: TypedConst,
    },
}
