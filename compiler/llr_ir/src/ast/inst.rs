//! Function bodies: blocks, instructions, terminators and operands.

use super::{FuncAttr, MdOperand, MetadataAttachment, ParamAttr, ParsedConst, ParsedType, TypedConst};
use crate::{
    ArithFlags, AtomicOp, AtomicOrdering, BinaryOp, CallingConv, CastOp, ClauseKind,
    FastMathFlags, FloatPredicate, Ident, IntPredicate, Span, TailKind,
};

/// Identifier of a defined local: instruction result, block label or parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LocalDef {
    pub ident: Ident,
    pub span: Span,
}

/// `label %bb` operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LabelRef {
    pub ident: Ident,
    pub span: Span,
}

/// `asm [sideeffect] [alignstack] [inteldialect] "text", "constraints"`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InlineAsm {
    pub asm: Vec<u8>,
    pub constraints: Vec<u8>,
    pub side_effect: bool,
    pub align_stack: bool,
    pub intel_dialect: bool,
}

/// An operand whose type comes from context.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedValue {
    pub kind: ValueKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueKind {
    Local(Ident),
    Const(ParsedConst),
    InlineAsm(InlineAsm),
    /// Operand of type `metadata`.
    Metadata(MdOperand),
}

/// An operand with its written type: `i32 %x`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypedValue {
    pub ty: ParsedType,
    pub value: ParsedValue,
}

/// Call argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedArg {
    pub ty: ParsedType,
    pub attrs: Vec<ParamAttr>,
    pub value: ParsedValue,
}

/// Everything between `call` and the end of a call or invoke.
///
/// `ty` is either the full function type or only the return type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallSite {
    pub tail: Option<TailKind>,
    pub fmf: FastMathFlags,
    pub cconv: Option<CallingConv>,
    pub ret_attrs: Vec<ParamAttr>,
    pub ty: ParsedType,
    pub callee: ParsedValue,
    pub args: Vec<ParsedArg>,
    pub fn_attrs: Vec<FuncAttr>,
}

/// `[ %v, %bb ]` pair of a phi.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PhiIncoming {
    pub value: ParsedValue,
    pub block: LabelRef,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LandingPadClause {
    pub kind: ClauseKind,
    pub value: TypedValue,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum InstKind {
    FNeg {
        fmf: FastMathFlags,
        operand: TypedValue,
    },
    Binary {
        op: BinaryOp,
        flags: ArithFlags,
        fmf: FastMathFlags,
        ty: ParsedType,
        lhs: ParsedValue,
        rhs: ParsedValue,
    },
    ExtractElement {
        vector: TypedValue,
        index: TypedValue,
    },
    InsertElement {
        vector: TypedValue,
        element: TypedValue,
        index: TypedValue,
    },
    ShuffleVector {
        lhs: TypedValue,
        rhs: TypedValue,
        mask: TypedValue,
    },
    ExtractValue {
        aggregate: TypedValue,
        indices: Vec<u32>,
    },
    InsertValue {
        aggregate: TypedValue,
        element: TypedValue,
        indices: Vec<u32>,
    },
    Alloca {
        inalloca: bool,
        ty: ParsedType,
        count: Option<TypedValue>,
        align: Option<u64>,
        addr_space: u32,
    },
    Load {
        volatile: bool,
        ty: ParsedType,
        ptr: TypedValue,
        ordering: Option<AtomicOrdering>,
        align: Option<u64>,
    },
    Store {
        volatile: bool,
        value: TypedValue,
        ptr: TypedValue,
        ordering: Option<AtomicOrdering>,
        align: Option<u64>,
    },
    Fence {
        ordering: AtomicOrdering,
    },
    CmpXchg {
        weak: bool,
        volatile: bool,
        ptr: TypedValue,
        cmp: TypedValue,
        new: TypedValue,
        success: AtomicOrdering,
        failure: AtomicOrdering,
        align: Option<u64>,
    },
    AtomicRmw {
        volatile: bool,
        op: AtomicOp,
        ptr: TypedValue,
        value: TypedValue,
        ordering: AtomicOrdering,
        align: Option<u64>,
    },
    Gep {
        inbounds: bool,
        source: ParsedType,
        base: TypedValue,
        indices: Vec<TypedValue>,
    },
    Cast {
        op: CastOp,
        value: TypedValue,
        to: ParsedType,
    },
    ICmp {
        pred: IntPredicate,
        ty: ParsedType,
        lhs: ParsedValue,
        rhs: ParsedValue,
    },
    FCmp {
        fmf: FastMathFlags,
        pred: FloatPredicate,
        ty: ParsedType,
        lhs: ParsedValue,
        rhs: ParsedValue,
    },
    Phi {
        fmf: FastMathFlags,
        ty: ParsedType,
        incoming: Vec<PhiIncoming>,
    },
    Select {
        fmf: FastMathFlags,
        cond: TypedValue,
        then: TypedValue,
        otherwise: TypedValue,
    },
    Freeze {
        operand: TypedValue,
    },
    Call(CallSite),
    VaArg {
        list: TypedValue,
        ty: ParsedType,
    },
    LandingPad {
        ty: ParsedType,
        cleanup: bool,
        clauses: Vec<LandingPadClause>,
    },
    /// `catchpad within %cs [args]`.
    CatchPad {
        parent: ParsedValue,
        args: Vec<TypedValue>,
    },
    /// `cleanuppad within none [args]`; the parent is `none` or a pad.
    CleanupPad {
        parent: ParsedValue,
        args: Vec<TypedValue>,
    },
}

/// `i32 1, label %bb` entry of a switch.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SwitchCase {
    pub value: TypedConst,
    pub target: LabelRef,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TermKind {
    /// `ret void` is `Ret(None)`.
    Ret(Option<TypedValue>),
    Br(LabelRef),
    CondBr {
        cond: TypedValue,
        then: LabelRef,
        otherwise: LabelRef,
    },
    Switch {
        value: TypedValue,
        default: LabelRef,
        cases: Vec<SwitchCase>,
    },
    IndirectBr {
        address: TypedValue,
        targets: Vec<LabelRef>,
    },
    Invoke {
        call: CallSite,
        normal: LabelRef,
        unwind: LabelRef,
    },
    Resume(TypedValue),
    /// `unwind` is `None` for `unwind to caller`.
    CatchSwitch {
        parent: ParsedValue,
        handlers: Vec<LabelRef>,
        unwind: Option<LabelRef>,
    },
    CatchRet {
        pad: ParsedValue,
        target: LabelRef,
    },
    CleanupRet {
        pad: ParsedValue,
        unwind: Option<LabelRef>,
    },
    CallBr {
        call: CallSite,
        normal: LabelRef,
        indirect: Vec<LabelRef>,
    },
    Unreachable,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedInst {
    pub result: Option<LocalDef>,
    pub kind: InstKind,
    pub metadata: Vec<MetadataAttachment>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedTerm {
    /// Only `invoke`, `callbr` and `catchswitch` may carry a result.
    pub result: Option<LocalDef>,
    pub kind: TermKind,
    pub metadata: Vec<MetadataAttachment>,
    pub span: Span,
}

/// A basic block. `label` is `None` for an unlabelled entry block.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedBlock {
    pub label: Option<LocalDef>,
    pub insts: Vec<ParsedInst>,
    pub term: ParsedTerm,
    pub span: Span,
}
