//! Function bodies.
//!
//! Each body resolves in four stages over its own local table:
//!
//! 1. **Skeletons** (`skeleton`): the result type of every instruction and
//!    terminator, from written types only.
//! 2. **Numbering** (`numbering`): implicit `%N` identifiers, skipping
//!    void values.
//! 3. **Registration**: every named or numbered local is declared.
//! 4. **Operands** (`operands`): instructions are translated in text
//!    order. Every block and result is registered by now, so phi incoming
//!    values and branch targets may refer forward.
//!
//! Bodies only read the frozen [`ModuleScope`], so distinct bodies can be
//! resolved concurrently.

mod numbering;
mod operands;
mod skeleton;


use llr_ir::ast::{FuncDef, LabelRef};
use llr_ir::{Ident, Span};
use llr_module::{
    next_raw, BlockId, FunctionBody, GlobalId, InstId, LocalIdent, LocalRef, Type, TypeId,
};
use tracing::trace;

use crate::scope::{LocalScope, ModuleScope};
use crate::types::TypeCx;
use crate::{FrozenTable, IdentTable, ResolveError, Scope};

use numbering::{assign_numbers, Slot};
use skeleton::{compute_shape, Shape};

/// A resolved body and the identifiers of the function's parameters.
#[derive(Debug)]
pub(crate) struct ResolvedBody {
    pub(crate) params: Vec<LocalIdent>,
    pub(crate) body: FunctionBody,
}

/// Assigned identifiers, grouped by kind of local.
#[derive(Debug, Default)]
struct LocalIdents {
    params: Vec<LocalIdent>,
    blocks: Vec<LocalIdent>,
    insts: Vec<LocalIdent>,
    terms: Vec<LocalIdent>,
}

/// The local namespace of one function after registration.
struct FunctionLocals {
    function: Ident,
    table: FrozenTable<LocalRef>,
    param_tys: Vec<TypeId>,
    shape: Shape,
}

impl FunctionLocals {
    fn ty_of(&self, local: LocalRef) -> Option<TypeId> {
        match local {
            LocalRef::Param(idx) => self.param_tys.get(idx as usize).copied(),
            LocalRef::Block(_) => Some(TypeId::LABEL),
            LocalRef::Inst(id) => self.shape.inst_tys.get(id.index()).copied(),
            LocalRef::Term(block) => self.shape.term_tys.get(block.index()).copied(),
        }
    }

    /// A `label %bb` operand.
    fn resolve_label(&self, types: &TypeCx<'_>, label: LabelRef) -> Result<BlockId, ResolveError> {
        match self.resolve_local(label.ident, label.span)? {
            (LocalRef::Block(block), _) => Ok(block),
            (_, ty) => Err(types.mismatch("label", ty, label.span)),
        }
    }
}

impl LocalScope for FunctionLocals {
    fn resolve_local(&self, ident: Ident, span: Span) -> Result<(LocalRef, TypeId), ResolveError> {
        let local = self
            .table
            .resolve(ident)
            .ok_or(ResolveError::UnresolvedIdentifier {
                scope: Scope::Local {
                    function: self.function,
                },
                ident,
                span,
            })?;
        let ty = self
            .ty_of(local)
            .ok_or_else(|| ResolveError::malformed("local registered without a result type", span))?;
        Ok((local, ty))
    }
}

/// Resolve the body of the function `id`, defined by `def`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        function = %def.header.ident.to_text('@', scope.types.interner),
        blocks = def.blocks.len(),
    )
)]
pub(crate) fn resolve_body(
    scope: &ModuleScope<'_>,
    id: GlobalId,
    def: &FuncDef,
) -> Result<ResolvedBody, ResolveError> {
    let function = def.header.ident;
    let Type::Function {
        params: param_tys, ..
    } = scope.types.pool.get(scope.skeleton(id).content)
    else {
        return Err(ResolveError::malformed(
            "function skeleton without a signature",
            def.header.span,
        ));
    };

    let shape = compute_shape(&scope.types, def)?;
    let slots = collect_slots(def, &shape);
    let assigned = assign_numbers(function, &slots)?;
    let (table, idents) = register(function, &slots, &assigned)?;
    trace!(locals = table.len(), "registered locals");

    let locals = FunctionLocals {
        function,
        table,
        param_tys,
        shape,
    };
    let body = operands::BodyResolver {
        scope,
        locals: &locals,
        idents: &idents,
        def,
    }
    .resolve()?;
    Ok(ResolvedBody {
        params: idents.params,
        body,
    })
}

/// Numbering candidates in text order.
fn collect_slots(def: &FuncDef, shape: &Shape) -> Vec<Slot> {
    let capacity = def.header.params.len() + def.blocks.len() * 2 + shape.inst_tys.len();
    let mut slots = Vec::with_capacity(capacity);
    for (idx, param) in def.header.params.iter().enumerate() {
        slots.push(Slot {
            local: LocalRef::Param(next_raw(idx)),
            ident: param.ident.map(|def| def.ident),
            void: false,
            span: param.ident.map_or(def.header.span, |def| def.span),
        });
    }

    let mut inst_idx = 0;
    for (block_idx, block) in def.blocks.iter().enumerate() {
        let block_id = BlockId::new(next_raw(block_idx));
        slots.push(Slot {
            local: LocalRef::Block(block_id),
            ident: block.label.map(|label| label.ident),
            void: false,
            span: block.label.map_or(block.span, |label| label.span),
        });
        for inst in &block.insts {
            slots.push(Slot {
                local: LocalRef::Inst(InstId::new(next_raw(inst_idx))),
                ident: inst.result.map(|result| result.ident),
                void: shape.inst_tys.get(inst_idx) == Some(&TypeId::VOID),
                span: inst.result.map_or(inst.span, |result| result.span),
            });
            inst_idx += 1;
        }
        let term = &block.term;
        slots.push(Slot {
            local: LocalRef::Term(block_id),
            ident: term.result.map(|result| result.ident),
            void: shape.term_tys.get(block_idx) == Some(&TypeId::VOID),
            span: term.result.map_or(term.span, |result| result.span),
        });
    }
    slots
}

/// Stage 3: declare every identified slot.
fn register(
    function: Ident,
    slots: &[Slot],
    assigned: &[LocalIdent],
) -> Result<(FrozenTable<LocalRef>, LocalIdents), ResolveError> {
    let mut table = IdentTable::with_capacity(slots.len());
    let mut idents = LocalIdents::default();
    for (slot, &ident) in slots.iter().zip(assigned) {
        if let Some(key) = ident.to_ident() {
            table
                .declare(key, slot.local, slot.span)
                .map_err(|first| ResolveError::DuplicateIdentifier {
                    scope: Scope::Local { function },
                    ident: key,
                    first,
                    second: slot.span,
                })?;
        }
        match slot.local {
            LocalRef::Param(_) => idents.params.push(ident),
            LocalRef::Block(_) => idents.blocks.push(ident),
            LocalRef::Inst(_) => idents.insts.push(ident),
            LocalRef::Term(_) => idents.terms.push(ident),
        }
    }
    Ok((table.freeze(), idents))
}
