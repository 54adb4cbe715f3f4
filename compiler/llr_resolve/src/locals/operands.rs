//! Stage 4: operands.

use llr_ir::ast::{self, CallSite, FuncDef, LabelRef, ParsedValue, TypedValue};
use llr_module::{
    next_raw, BasicBlock, BlockId, CallArg, CallInst, Constant, FunctionBody, InstId, InstKind,
    Instruction, LocalRef, TermKind, Terminator, TypeId, Value,
};

use super::skeleton::call_type;
use super::{FunctionLocals, LocalIdents};
use crate::attrs::{resolve_func_attrs, resolve_param_attrs};
use crate::scope::ModuleScope;
use crate::ResolveError;

/// What an exception-handling operand must name.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Pad {
    CatchSwitch,
    CatchPad,
    CleanupPad,
}

impl Pad {
    fn opcode(self) -> &'static str {
        match self {
            Pad::CatchSwitch => "catchswitch",
            Pad::CatchPad => "catchpad",
            Pad::CleanupPad => "cleanuppad",
        }
    }
}

pub(super) struct BodyResolver<'a> {
    pub(super) scope: &'a ModuleScope<'a>,
    pub(super) locals: &'a FunctionLocals,
    pub(super) idents: &'a LocalIdents,
    pub(super) def: &'a FuncDef,
}

impl BodyResolver<'_> {
    pub(super) fn resolve(&self) -> Result<FunctionBody, ResolveError> {
        let def = self.def;
        let mut body = FunctionBody {
            blocks: Vec::with_capacity(def.blocks.len()),
            insts: Vec::with_capacity(self.locals.shape.inst_tys.len()),
        };
        for (block_idx, block) in def.blocks.iter().enumerate() {
            let mut inst_ids = Vec::with_capacity(block.insts.len());
            for inst in &block.insts {
                let id = InstId::new(next_raw(body.insts.len()));
                let (Some(&ty), Some(&ident)) = (
                    self.locals.shape.inst_tys.get(id.index()),
                    self.idents.insts.get(id.index()),
                ) else {
                    return Err(ResolveError::malformed(
                        "instruction without a skeleton",
                        inst.span,
                    ));
                };
                body.insts.push(Instruction {
                    ident,
                    ty,
                    kind: self.inst(&inst.kind, ty)?,
                    metadata: self.scope.resolve_attachments(&inst.metadata)?,
                });
                inst_ids.push(id);
            }

            let term = &block.term;
            let (Some(&ty), Some(&term_ident), Some(&ident)) = (
                self.locals.shape.term_tys.get(block_idx),
                self.idents.terms.get(block_idx),
                self.idents.blocks.get(block_idx),
            ) else {
                return Err(ResolveError::malformed("block without a skeleton", block.span));
            };
            body.blocks.push(BasicBlock {
                ident,
                insts: inst_ids,
                term: Terminator {
                    ident: term_ident,
                    ty,
                    kind: self.term(&term.kind)?,
                    metadata: self.scope.resolve_attachments(&term.metadata)?,
                },
            });
        }
        Ok(body)
    }

    // ── Operand helpers ─────────────────────────────────────────────

    fn value(&self, ty: TypeId, value: &ParsedValue) -> Result<Value, ResolveError> {
        self.scope.resolve_value(self.locals, ty, value)
    }

    fn typed(&self, value: &TypedValue) -> Result<Value, ResolveError> {
        self.scope.resolve_typed_value(self.locals, value)
    }

    fn label(&self, label: LabelRef) -> Result<BlockId, ResolveError> {
        self.locals.resolve_label(&self.scope.types, label)
    }

    fn ty(&self, ty: &ast::ParsedType) -> Result<TypeId, ResolveError> {
        self.scope.types.resolve(ty)
    }

    /// The pad instruction or `catchswitch` that `local` names, if any.
    fn pad_kind(&self, local: LocalRef) -> Option<Pad> {
        match local {
            LocalRef::Inst(id) => {
                let inst = self
                    .def
                    .blocks
                    .iter()
                    .flat_map(|block| &block.insts)
                    .nth(id.index())?;
                match inst.kind {
                    ast::InstKind::CatchPad { .. } => Some(Pad::CatchPad),
                    ast::InstKind::CleanupPad { .. } => Some(Pad::CleanupPad),
                    _ => None,
                }
            }
            LocalRef::Term(block) => match self.def.blocks.get(block.index())?.term.kind {
                ast::TermKind::CatchSwitch { .. } => Some(Pad::CatchSwitch),
                _ => None,
            },
            LocalRef::Param(_) | LocalRef::Block(_) => None,
        }
    }

    /// A `token` operand that must be one of `allowed`; `none` passes when
    /// `allow_none` is set.
    fn pad(
        &self,
        value: &ParsedValue,
        allowed: &[Pad],
        allow_none: bool,
    ) -> Result<Value, ResolveError> {
        let resolved = self.value(TypeId::TOKEN, value)?;
        let found = match &resolved {
            Value::Const(Constant::None(_)) if allow_none => return Ok(resolved),
            Value::Local { local, .. } => self.pad_kind(*local),
            _ => None,
        };
        if found.is_some_and(|pad| allowed.contains(&pad)) {
            return Ok(resolved);
        }
        let mut expected: Vec<String> = allowed
            .iter()
            .map(|pad| format!("`{}`", pad.opcode()))
            .collect();
        if allow_none {
            expected.insert(0, "`none`".to_string());
        }
        let expected = expected.join(" or ");
        Err(match found {
            Some(pad) => ResolveError::TypeMismatch {
                expected,
                found: pad.opcode().to_string(),
                span: value.span,
            },
            None => self.scope.types.mismatch(expected, resolved.ty(), value.span),
        })
    }

    /// An enclosing pad: `none`, a `catchpad` or a `cleanuppad`.
    fn parent_pad(&self, value: &ParsedValue) -> Result<Value, ResolveError> {
        self.pad(value, &[Pad::CatchPad, Pad::CleanupPad], true)
    }

    fn pad_args(&self, args: &[TypedValue]) -> Result<Vec<Value>, ResolveError> {
        args.iter().map(|arg| self.typed(arg)).collect()
    }

    fn labels(&self, labels: &[LabelRef]) -> Result<Vec<BlockId>, ResolveError> {
        labels.iter().map(|label| self.label(*label)).collect()
    }

    fn unwind(&self, label: Option<LabelRef>) -> Result<Option<BlockId>, ResolveError> {
        label.map(|label| self.label(label)).transpose()
    }

    /// `call`/`invoke`/`callbr`. The callee must be a pointer to a function.
    fn call(&self, call: &CallSite) -> Result<CallInst, ResolveError> {
        let types = &self.scope.types;
        let fn_ty = call_type(types, call)?;
        let callee = self.value(types.pool.pointer_to(fn_ty, 0), &call.callee)?;
        let callee_ty = match &callee {
            Value::Const(Constant::Global { id, .. }) => self.scope.skeleton(*id).ty,
            other => other.ty(),
        };
        if !types.is_function_pointer(callee_ty) {
            return Err(types.mismatch("pointer to function", callee_ty, call.callee.span));
        }
        let args = call
            .args
            .iter()
            .map(|arg| {
                Ok(CallArg {
                    value: self.value(self.ty(&arg.ty)?, &arg.value)?,
                    attrs: resolve_param_attrs(types, &arg.attrs)?,
                })
            })
            .collect::<Result<_, ResolveError>>()?;
        Ok(CallInst {
            tail: call.tail,
            fmf: call.fmf,
            cconv: call.cconv,
            ret_attrs: resolve_param_attrs(types, &call.ret_attrs)?,
            fn_ty,
            callee,
            args,
            fn_attrs: resolve_func_attrs(&self.scope.attr_groups, &call.fn_attrs)?,
        })
    }

    // ── Instructions ────────────────────────────────────────────────

    /// `ty` is the result type computed in stage 1.
    fn inst(&self, kind: &ast::InstKind, ty: TypeId) -> Result<InstKind, ResolveError> {
        Ok(match kind {
            ast::InstKind::FNeg { fmf, operand } => InstKind::FNeg {
                fmf: *fmf,
                operand: self.typed(operand)?,
            },
            ast::InstKind::Binary {
                op,
                flags,
                fmf,
                ty,
                lhs,
                rhs,
            } => {
                let ty = self.ty(ty)?;
                InstKind::Binary {
                    op: *op,
                    flags: *flags,
                    fmf: *fmf,
                    lhs: self.value(ty, lhs)?,
                    rhs: self.value(ty, rhs)?,
                }
            }
            ast::InstKind::ExtractElement { vector, index } => InstKind::ExtractElement {
                vector: self.typed(vector)?,
                index: self.typed(index)?,
            },
            ast::InstKind::InsertElement {
                vector,
                element,
                index,
            } => InstKind::InsertElement {
                vector: self.typed(vector)?,
                element: self.typed(element)?,
                index: self.typed(index)?,
            },
            ast::InstKind::ShuffleVector { lhs, rhs, mask } => InstKind::ShuffleVector {
                lhs: self.typed(lhs)?,
                rhs: self.typed(rhs)?,
                mask: self.typed(mask)?,
            },
            ast::InstKind::ExtractValue { aggregate, indices } => InstKind::ExtractValue {
                aggregate: self.typed(aggregate)?,
                indices: indices.iter().copied().collect(),
            },
            ast::InstKind::InsertValue {
                aggregate,
                element,
                indices,
            } => InstKind::InsertValue {
                aggregate: self.typed(aggregate)?,
                element: self.typed(element)?,
                indices: indices.iter().copied().collect(),
            },
            ast::InstKind::Alloca {
                inalloca,
                ty,
                count,
                align,
                addr_space,
            } => InstKind::Alloca {
                inalloca: *inalloca,
                allocated: self.ty(ty)?,
                count: count.as_ref().map(|count| self.typed(count)).transpose()?,
                align: *align,
                addr_space: *addr_space,
            },
            ast::InstKind::Load {
                volatile,
                ptr,
                ordering,
                align,
                ..
            } => InstKind::Load {
                volatile: *volatile,
                ptr: self.typed(ptr)?,
                ordering: *ordering,
                align: *align,
            },
            ast::InstKind::Store {
                volatile,
                value,
                ptr,
                ordering,
                align,
            } => InstKind::Store {
                volatile: *volatile,
                value: self.typed(value)?,
                ptr: self.typed(ptr)?,
                ordering: *ordering,
                align: *align,
            },
            ast::InstKind::Fence { ordering } => InstKind::Fence {
                ordering: *ordering,
            },
            ast::InstKind::CmpXchg {
                weak,
                volatile,
                ptr,
                cmp,
                new,
                success,
                failure,
                align,
            } => InstKind::CmpXchg {
                weak: *weak,
                volatile: *volatile,
                ptr: self.typed(ptr)?,
                cmp: self.typed(cmp)?,
                new: self.typed(new)?,
                success: *success,
                failure: *failure,
                align: *align,
            },
            ast::InstKind::AtomicRmw {
                volatile,
                op,
                ptr,
                value,
                ordering,
                align,
            } => InstKind::AtomicRmw {
                volatile: *volatile,
                op: *op,
                ptr: self.typed(ptr)?,
                value: self.typed(value)?,
                ordering: *ordering,
                align: *align,
            },
            ast::InstKind::Gep {
                inbounds,
                source,
                base,
                indices,
            } => InstKind::Gep {
                inbounds: *inbounds,
                source: self.ty(source)?,
                base: self.typed(base)?,
                indices: indices
                    .iter()
                    .map(|index| self.typed(index))
                    .collect::<Result<_, _>>()?,
            },
            ast::InstKind::Cast { op, value, .. } => InstKind::Cast {
                op: *op,
                value: self.typed(value)?,
            },
            ast::InstKind::ICmp { pred, ty, lhs, rhs } => {
                let ty = self.ty(ty)?;
                InstKind::ICmp {
                    pred: *pred,
                    lhs: self.value(ty, lhs)?,
                    rhs: self.value(ty, rhs)?,
                }
            }
            ast::InstKind::FCmp {
                fmf,
                pred,
                ty,
                lhs,
                rhs,
            } => {
                let ty = self.ty(ty)?;
                InstKind::FCmp {
                    fmf: *fmf,
                    pred: *pred,
                    lhs: self.value(ty, lhs)?,
                    rhs: self.value(ty, rhs)?,
                }
            }
            ast::InstKind::Phi { fmf, incoming, .. } => InstKind::Phi {
                fmf: *fmf,
                incoming: incoming
                    .iter()
                    .map(|pair| Ok((self.value(ty, &pair.value)?, self.label(pair.block)?)))
                    .collect::<Result<_, ResolveError>>()?,
            },
            ast::InstKind::Select {
                fmf,
                cond,
                then,
                otherwise,
            } => InstKind::Select {
                fmf: *fmf,
                cond: self.typed(cond)?,
                then: self.typed(then)?,
                otherwise: self.typed(otherwise)?,
            },
            ast::InstKind::Freeze { operand } => InstKind::Freeze {
                operand: self.typed(operand)?,
            },
            ast::InstKind::Call(call) => InstKind::Call(self.call(call)?),
            ast::InstKind::VaArg { list, .. } => InstKind::VaArg {
                list: self.typed(list)?,
            },
            ast::InstKind::LandingPad {
                cleanup, clauses, ..
            } => InstKind::LandingPad {
                cleanup: *cleanup,
                clauses: clauses
                    .iter()
                    .map(|clause| Ok((clause.kind, self.typed(&clause.value)?)))
                    .collect::<Result<_, ResolveError>>()?,
            },
            ast::InstKind::CatchPad { parent, args } => InstKind::CatchPad {
                parent: self.pad(parent, &[Pad::CatchSwitch], false)?,
                args: self.pad_args(args)?,
            },
            ast::InstKind::CleanupPad { parent, args } => InstKind::CleanupPad {
                parent: self.parent_pad(parent)?,
                args: self.pad_args(args)?,
            },
        })
    }

    // ── Terminators ─────────────────────────────────────────────────

    fn term(&self, kind: &ast::TermKind) -> Result<TermKind, ResolveError> {
        Ok(match kind {
            ast::TermKind::Ret(value) => {
                TermKind::Ret(value.as_ref().map(|value| self.typed(value)).transpose()?)
            }
            ast::TermKind::Br(target) => TermKind::Br(self.label(*target)?),
            ast::TermKind::CondBr {
                cond,
                then,
                otherwise,
            } => TermKind::CondBr {
                cond: self.typed(cond)?,
                then: self.label(*then)?,
                otherwise: self.label(*otherwise)?,
            },
            ast::TermKind::Switch {
                value,
                default,
                cases,
            } => TermKind::Switch {
                value: self.typed(value)?,
                default: self.label(*default)?,
                cases: cases
                    .iter()
                    .map(|case| {
                        Ok((
                            self.scope.resolve_typed_const(&case.value)?,
                            self.label(case.target)?,
                        ))
                    })
                    .collect::<Result<_, ResolveError>>()?,
            },
            ast::TermKind::IndirectBr { address, targets } => TermKind::IndirectBr {
                address: self.typed(address)?,
                targets: self.labels(targets)?,
            },
            ast::TermKind::Invoke {
                call,
                normal,
                unwind,
            } => TermKind::Invoke {
                call: self.call(call)?,
                normal: self.label(*normal)?,
                unwind: self.label(*unwind)?,
            },
            ast::TermKind::Resume(value) => TermKind::Resume(self.typed(value)?),
            ast::TermKind::CatchSwitch {
                parent,
                handlers,
                unwind,
            } => TermKind::CatchSwitch {
                parent: self.parent_pad(parent)?,
                handlers: self.labels(handlers)?,
                unwind: self.unwind(*unwind)?,
            },
            ast::TermKind::CatchRet { pad, target } => TermKind::CatchRet {
                pad: self.pad(pad, &[Pad::CatchPad], false)?,
                target: self.label(*target)?,
            },
            ast::TermKind::CleanupRet { pad, unwind } => TermKind::CleanupRet {
                pad: self.pad(pad, &[Pad::CleanupPad], false)?,
                unwind: self.unwind(*unwind)?,
            },
            ast::TermKind::CallBr {
                call,
                normal,
                indirect,
            } => TermKind::CallBr {
                call: self.call(call)?,
                normal: self.label(*normal)?,
                indirect: self.labels(indirect)?,
            },
            ast::TermKind::Unreachable => TermKind::Unreachable,
        })
    }
}
