//! Resolved constants.

use llr_ir::{ArithFlags, BinaryOp, CastOp, FloatPredicate, IntPredicate, Name};

use crate::{BlockAddressId, GlobalId, TypeId};

/// Value of a floating constant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FloatValue {
    /// `f64` bits; used for `float` and `double` and for decimal literals of
    /// any kind.
    Double(u64),
    /// Hex literal text kept verbatim (`0xK...`, `0xH...`).
    Hex(Name),
}

/// A constant, always carrying its type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Constant {
    /// `i1` values are stored as 0 or 1 and print as `false`/`true`.
    Int {
        ty: TypeId,
        value: i128,
    },
    Float {
        ty: TypeId,
        value: FloatValue,
    },
    Null(TypeId),
    Undef(TypeId),
    Poison(TypeId),
    ZeroInitializer(TypeId),
    /// The `none` token.
    None(TypeId),
    Array {
        ty: TypeId,
        elems: Vec<Constant>,
    },
    CharArray {
        ty: TypeId,
        bytes: Vec<u8>,
    },
    /// Packedness is part of `ty`.
    Struct {
        ty: TypeId,
        fields: Vec<Constant>,
    },
    Vector {
        ty: TypeId,
        elems: Vec<Constant>,
    },
    /// Address of a global. `ty` is the global's pointer type.
    Global {
        ty: TypeId,
        id: GlobalId,
    },
    /// `blockaddress(@f, %bb)`; the target lives in `Module::block_addresses`.
    BlockAddress {
        ty: TypeId,
        slot: BlockAddressId,
    },
    Expr {
        ty: TypeId,
        expr: Box<ConstExpr>,
    },
}

impl Constant {
    pub fn ty(&self) -> TypeId {
        match self {
            Constant::Int { ty, .. }
            | Constant::Float { ty, .. }
            | Constant::Array { ty, .. }
            | Constant::CharArray { ty, .. }
            | Constant::Struct { ty, .. }
            | Constant::Vector { ty, .. }
            | Constant::Global { ty, .. }
            | Constant::BlockAddress { ty, .. }
            | Constant::Expr { ty, .. } => *ty,
            Constant::Null(ty)
            | Constant::Undef(ty)
            | Constant::Poison(ty)
            | Constant::ZeroInitializer(ty)
            | Constant::None(ty) => *ty,
        }
    }

    /// The global this constant is the address of, if any.
    pub fn as_global(&self) -> Option<GlobalId> {
        match self {
            Constant::Global { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Constant expressions. The result type is the enclosing
/// `Constant::Expr::ty`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstExpr {
    Gep {
        inbounds: bool,
        source: TypeId,
        base: Constant,
        indices: Vec<Constant>,
    },
    Cast {
        op: CastOp,
        value: Constant,
    },
    Binary {
        op: BinaryOp,
        flags: ArithFlags,
        lhs: Constant,
        rhs: Constant,
    },
    ICmp {
        pred: IntPredicate,
        lhs: Constant,
        rhs: Constant,
    },
    FCmp {
        pred: FloatPredicate,
        lhs: Constant,
        rhs: Constant,
    },
    Select {
        cond: Constant,
        then: Constant,
        otherwise: Constant,
    },
}
