//! Resolved instructions and terminators.

use llr_ir::{
    ArithFlags, AtomicOp, AtomicOrdering, BinaryOp, CallingConv, CastOp, ClauseKind,
    FastMathFlags, FloatPredicate, IntPredicate, TailKind,
};
use smallvec::SmallVec;

use crate::{
    BlockId, Constant, FuncAttr, LocalIdent, MetadataAttachment, ParamAttr, TypeId, Value,
};

/// A non-terminator instruction.
///
/// `ty` is the result type; `VOID` for instructions that yield nothing.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction {
    pub ident: LocalIdent,
    pub ty: TypeId,
    pub kind: InstKind,
    pub metadata: Vec<MetadataAttachment>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum InstKind {
    FNeg {
        fmf: FastMathFlags,
        operand: Value,
    },
    Binary {
        op: BinaryOp,
        flags: ArithFlags,
        fmf: FastMathFlags,
        lhs: Value,
        rhs: Value,
    },
    ExtractElement {
        vector: Value,
        index: Value,
    },
    InsertElement {
        vector: Value,
        element: Value,
        index: Value,
    },
    ShuffleVector {
        lhs: Value,
        rhs: Value,
        mask: Value,
    },
    ExtractValue {
        aggregate: Value,
        indices: SmallVec<[u32; 2]>,
    },
    InsertValue {
        aggregate: Value,
        element: Value,
        indices: SmallVec<[u32; 2]>,
    },
    Alloca {
        inalloca: bool,
        /// Allocated type; the result is a pointer to it.
        allocated: TypeId,
        count: Option<Value>,
        align: Option<u64>,
        addr_space: u32,
    },
    Load {
        volatile: bool,
        ptr: Value,
        ordering: Option<AtomicOrdering>,
        align: Option<u64>,
    },
    Store {
        volatile: bool,
        value: Value,
        ptr: Value,
        ordering: Option<AtomicOrdering>,
        align: Option<u64>,
    },
    Fence {
        ordering: AtomicOrdering,
    },
    CmpXchg {
        weak: bool,
        volatile: bool,
        ptr: Value,
        cmp: Value,
        new: Value,
        success: AtomicOrdering,
        failure: AtomicOrdering,
        align: Option<u64>,
    },
    AtomicRmw {
        volatile: bool,
        op: AtomicOp,
        ptr: Value,
        value: Value,
        ordering: AtomicOrdering,
        align: Option<u64>,
    },
    Gep {
        inbounds: bool,
        source: TypeId,
        base: Value,
        indices: Vec<Value>,
    },
    Cast {
        op: CastOp,
        value: Value,
    },
    ICmp {
        pred: IntPredicate,
        lhs: Value,
        rhs: Value,
    },
    FCmp {
        fmf: FastMathFlags,
        pred: FloatPredicate,
        lhs: Value,
        rhs: Value,
    },
    Phi {
        fmf: FastMathFlags,
        incoming: Vec<(Value, BlockId)>,
    },
    Select {
        fmf: FastMathFlags,
        cond: Value,
        then: Value,
        otherwise: Value,
    },
    Freeze {
        operand: Value,
    },
    Call(CallInst),
    VaArg {
        list: Value,
    },
    LandingPad {
        cleanup: bool,
        clauses: Vec<(ClauseKind, Value)>,
    },
    /// `parent` is the enclosing `catchswitch`.
    CatchPad {
        parent: Value,
        args: Vec<Value>,
    },
    /// `parent` is `none` or an enclosing pad.
    CleanupPad {
        parent: Value,
        args: Vec<Value>,
    },
}

/// A call or invoke site.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallInst {
    pub tail: Option<TailKind>,
    pub fmf: FastMathFlags,
    pub cconv: Option<CallingConv>,
    pub ret_attrs: Vec<ParamAttr>,
    /// The callee's function type.
    pub fn_ty: TypeId,
    pub callee: Value,
    pub args: Vec<CallArg>,
    pub fn_attrs: Vec<FuncAttr>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallArg {
    pub value: Value,
    pub attrs: Vec<ParamAttr>,
}

/// The terminator of a block.
///
/// `invoke` and `callbr` have the callee's return type, `catchswitch` has
/// `token`, and everything else is `VOID`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Terminator {
    pub ident: LocalIdent,
    pub ty: TypeId,
    pub kind: TermKind,
    pub metadata: Vec<MetadataAttachment>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TermKind {
    Ret(Option<Value>),
    Br(BlockId),
    CondBr {
        cond: Value,
        then: BlockId,
        otherwise: BlockId,
    },
    Switch {
        value: Value,
        default: BlockId,
        cases: Vec<(Constant, BlockId)>,
    },
    IndirectBr {
        address: Value,
        targets: Vec<BlockId>,
    },
    Invoke {
        call: CallInst,
        normal: BlockId,
        unwind: BlockId,
    },
    Resume(Value),
    /// `unwind: None` unwinds to the caller.
    CatchSwitch {
        parent: Value,
        handlers: Vec<BlockId>,
        unwind: Option<BlockId>,
    },
    /// `pad` is a `catchpad` result.
    CatchRet {
        pad: Value,
        target: BlockId,
    },
    /// `pad` is a `cleanuppad` result.
    CleanupRet {
        pad: Value,
        unwind: Option<BlockId>,
    },
    CallBr {
        call: CallInst,
        normal: BlockId,
        indirect: Vec<BlockId>,
    },
    Unreachable,
}

impl TermKind {
    /// Blocks control may transfer to, in operand order.
    pub fn successors(&self) -> SmallVec<[BlockId; 2]> {
        match self {
            TermKind::Br(target) => smallvec::smallvec![*target],
            TermKind::CondBr {
                then, otherwise, ..
            } => smallvec::smallvec![*then, *otherwise],
            TermKind::Switch { default, cases, .. } => std::iter::once(*default)
                .chain(cases.iter().map(|(_, block)| *block))
                .collect(),
            TermKind::IndirectBr { targets, .. } => targets.iter().copied().collect(),
            TermKind::Invoke { normal, unwind, .. } => smallvec::smallvec![*normal, *unwind],
            TermKind::CatchSwitch {
                handlers, unwind, ..
            } => handlers.iter().copied().chain(*unwind).collect(),
            TermKind::CatchRet { target, .. } => smallvec::smallvec![*target],
            TermKind::CleanupRet { unwind, .. } => unwind.iter().copied().collect(),
            TermKind::CallBr {
                normal, indirect, ..
            } => std::iter::once(*normal)
                .chain(indirect.iter().copied())
                .collect(),
            TermKind::Ret(_) | TermKind::Resume(_) | TermKind::Unreachable => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(raw: u32) -> BlockId {
        BlockId::new(raw)
    }

    #[test]
    fn test_unwind_to_caller_has_no_successor() {
        let pad = Value::Const(Constant::None(TypeId::TOKEN));
        let cleanup = TermKind::CleanupRet {
            pad: pad.clone(),
            unwind: None,
        };
        assert!(cleanup.successors().is_empty());

        let switch = TermKind::CatchSwitch {
            parent: pad,
            handlers: vec![block(1), block(2)],
            unwind: Some(block(3)),
        };
        assert_eq!(switch.successors().as_slice(), [block(1), block(2), block(3)]);
    }

    #[test]
    fn test_callbr_lists_normal_target_first() {
        let call = CallInst {
            tail: None,
            fmf: FastMathFlags::empty(),
            cconv: None,
            ret_attrs: Vec::new(),
            fn_ty: TypeId::VOID,
            callee: Value::Const(Constant::None(TypeId::TOKEN)),
            args: Vec::new(),
            fn_attrs: Vec::new(),
        };
        let term = TermKind::CallBr {
            call,
            normal: block(4),
            indirect: vec![block(1)],
        };
        assert_eq!(term.successors().as_slice(), [block(4), block(1)]);
    }
}
