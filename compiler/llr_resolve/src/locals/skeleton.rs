//! Stage 1: result types.
//!
//! Every result type is computed from the written types alone, before any
//! number is assigned, since whether a call consumes a number depends on
//! its callee's return type.

use llr_ir::ast::{CallSite, FuncDef, InstKind, ParsedConst, TermKind, TypedValue, ValueKind};
use llr_ir::Span;
use llr_module::{Type, TypeId};

use crate::types::{GepIndex, TypeCx};
use crate::ResolveError;

/// Result type of every instruction (flat, in text order) and terminator.
#[derive(Debug, Default)]
pub(super) struct Shape {
    pub(super) inst_tys: Vec<TypeId>,
    pub(super) term_tys: Vec<TypeId>,
}

pub(super) fn compute_shape(types: &TypeCx<'_>, def: &FuncDef) -> Result<Shape, ResolveError> {
    let mut shape = Shape {
        inst_tys: Vec::with_capacity(def.blocks.iter().map(|block| block.insts.len()).sum()),
        term_tys: Vec::with_capacity(def.blocks.len()),
    };
    for block in &def.blocks {
        for inst in &block.insts {
            shape.inst_tys.push(inst_result_type(types, &inst.kind, inst.span)?);
        }
        let term_ty = match &block.term.kind {
            TermKind::Invoke { call, .. } | TermKind::CallBr { call, .. } => {
                return_type(types, call_type(types, call)?)
            }
            TermKind::CatchSwitch { .. } => TypeId::TOKEN,
            _ => TypeId::VOID,
        };
        shape.term_tys.push(term_ty);
    }
    Ok(shape)
}

/// The callee's function type: the written type if it is one, else a
/// non-variadic function of the written return and argument types.
pub(super) fn call_type(types: &TypeCx<'_>, call: &CallSite) -> Result<TypeId, ResolveError> {
    let written = types.resolve(&call.ty)?;
    if matches!(types.pool.get(written), Type::Function { .. }) {
        return Ok(written);
    }
    let params = call
        .args
        .iter()
        .map(|arg| types.resolve(&arg.ty))
        .collect::<Result<_, _>>()?;
    Ok(types.pool.intern(Type::Function {
        ret: written,
        params,
        variadic: false,
    }))
}

fn return_type(types: &TypeCx<'_>, fn_ty: TypeId) -> TypeId {
    match types.pool.get(fn_ty) {
        Type::Function { ret, .. } => ret,
        _ => fn_ty,
    }
}

/// The literal value of an integer operand, if it is one.
fn literal_index(value: &ValueKind) -> Option<i128> {
    match value {
        ValueKind::Const(ParsedConst::Int(value)) => Some(*value),
        _ => None,
    }
}

fn gep_indices(
    types: &TypeCx<'_>,
    indices: &[TypedValue],
) -> Result<Vec<GepIndex>, ResolveError> {
    indices
        .iter()
        .map(|index| {
            Ok(GepIndex {
                ty: types.resolve(&index.ty)?,
                constant: literal_index(&index.value.kind),
            })
        })
        .collect()
}

fn inst_result_type(types: &TypeCx<'_>, kind: &InstKind, span: Span) -> Result<TypeId, ResolveError> {
    Ok(match kind {
        InstKind::FNeg { operand, .. } | InstKind::Freeze { operand } => types.resolve(&operand.ty)?,
        InstKind::Binary { ty, .. }
        | InstKind::Load { ty, .. }
        | InstKind::Phi { ty, .. }
        | InstKind::VaArg { ty, .. }
        | InstKind::LandingPad { ty, .. }
        | InstKind::Cast { to: ty, .. } => types.resolve(ty)?,
        InstKind::ExtractElement { vector, .. } => {
            types.vector_element(types.resolve(&vector.ty)?, span)?
        }
        InstKind::InsertElement { vector, .. } => types.resolve(&vector.ty)?,
        InstKind::ShuffleVector { lhs, mask, .. } => {
            types.shuffle_result(types.resolve(&lhs.ty)?, types.resolve(&mask.ty)?, span)?
        }
        InstKind::ExtractValue { aggregate, indices } => {
            types.member_type(types.resolve(&aggregate.ty)?, indices, span)?
        }
        InstKind::InsertValue { aggregate, .. } => types.resolve(&aggregate.ty)?,
        InstKind::Alloca { ty, addr_space, .. } => {
            types.pool.pointer_to(types.resolve(ty)?, *addr_space)
        }
        InstKind::Store { .. } | InstKind::Fence { .. } => TypeId::VOID,
        InstKind::CmpXchg { cmp, .. } => types.pool.intern(Type::Struct {
            fields: vec![types.resolve(&cmp.ty)?, TypeId::I1],
            packed: false,
        }),
        InstKind::AtomicRmw { value, .. } => types.resolve(&value.ty)?,
        InstKind::Gep {
            source,
            base,
            indices,
            ..
        } => types.gep_result(
            types.resolve(source)?,
            types.resolve(&base.ty)?,
            &gep_indices(types, indices)?,
            span,
        )?,
        InstKind::ICmp { ty, .. } | InstKind::FCmp { ty, .. } => {
            types.compare_result(types.resolve(ty)?)
        }
        InstKind::Select { then, .. } => types.resolve(&then.ty)?,
        InstKind::Call(call) => return_type(types, call_type(types, call)?),
        InstKind::CatchPad { .. } | InstKind::CleanupPad { .. } => TypeId::TOKEN,
    })
}
