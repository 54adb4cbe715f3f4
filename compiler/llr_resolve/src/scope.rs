//! The frozen module scope.
//!
//! Once every global skeleton exists, the module-level tables never change
//! again. [`ModuleScope`] bundles them; global bodies, metadata and every
//! function body resolve against a shared `&ModuleScope`, which is `Sync`
//! so bodies can be resolved in parallel.

use llr_ir::ast::{self, ParsedValue, TypedValue, ValueKind};
use llr_ir::{Ident, Span};
use llr_module::{
    AttrGroupId, ComdatId, GlobalId, LocalRef, MdOperand, MetadataAttachment, MetadataId, TypeId,
    Value,
};
use llr_stack::ensure_sufficient_stack;

use crate::blockaddress::BlockAddressLog;
use crate::types::TypeCx;
use crate::{FrozenTable, ResolveError, Scope};

/// What phase 1 knows about a global: its pointer type and content type.
#[derive(Copy, Clone, Debug)]
pub(crate) struct GlobalSkeleton {
    /// Pointer to `content` in the symbol's address space.
    pub(crate) ty: TypeId,
    /// Value type of a variable, aliasee type, or function signature.
    pub(crate) content: TypeId,
    pub(crate) is_function: bool,
}

pub(crate) struct ModuleScope<'a> {
    pub(crate) types: TypeCx<'a>,
    pub(crate) comdats: FrozenTable<ComdatId>,
    pub(crate) attr_groups: FrozenTable<AttrGroupId>,
    pub(crate) metadata: FrozenTable<MetadataId>,
    pub(crate) globals: FrozenTable<GlobalId>,
    pub(crate) skeletons: Vec<GlobalSkeleton>,
    pub(crate) block_addresses: BlockAddressLog,
}

/// Where `%x` operands resolve.
pub(crate) trait LocalScope {
    fn resolve_local(&self, ident: Ident, span: Span) -> Result<(LocalRef, TypeId), ResolveError>;
}

/// Module level: there are no locals.
pub(crate) struct NoLocals;

impl LocalScope for NoLocals {
    fn resolve_local(&self, _ident: Ident, span: Span) -> Result<(LocalRef, TypeId), ResolveError> {
        Err(ResolveError::invalid_constant(
            "local value outside a function body",
            span,
        ))
    }
}

impl ModuleScope<'_> {
    pub(crate) fn resolve_global(&self, ident: Ident, span: Span) -> Result<GlobalId, ResolveError> {
        self.globals
            .resolve(ident)
            .ok_or(ResolveError::UnresolvedIdentifier {
                scope: Scope::Global,
                ident,
                span,
            })
    }

    pub(crate) fn skeleton(&self, id: GlobalId) -> GlobalSkeleton {
        self.skeletons[id.index()]
    }

    // ── Operands ────────────────────────────────────────────────────

    /// An operand whose type `ty` comes from context.
    pub(crate) fn resolve_value(
        &self,
        locals: &dyn LocalScope,
        ty: TypeId,
        value: &ParsedValue,
    ) -> Result<Value, ResolveError> {
        match &value.kind {
            ValueKind::Local(ident) => {
                let (local, ty) = locals.resolve_local(*ident, value.span)?;
                Ok(Value::Local { local, ty })
            }
            ValueKind::Const(constant) => {
                Ok(Value::Const(self.resolve_const(ty, constant, value.span)?))
            }
            ValueKind::InlineAsm(asm) => Ok(Value::InlineAsm {
                ty,
                asm: asm.clone(),
            }),
            ValueKind::Metadata(operand) => {
                Ok(Value::Metadata(self.resolve_md_operand(locals, operand)?))
            }
        }
    }

    pub(crate) fn resolve_typed_value(
        &self,
        locals: &dyn LocalScope,
        value: &TypedValue,
    ) -> Result<Value, ResolveError> {
        let ty = self.types.resolve(&value.ty)?;
        self.resolve_value(locals, ty, &value.value)
    }

    // ── Metadata ────────────────────────────────────────────────────

    pub(crate) fn resolve_md_ref(&self, node: ast::MetadataRef) -> Result<MetadataId, ResolveError> {
        let ident = Ident::Id(node.id);
        self.metadata
            .resolve(ident)
            .ok_or(ResolveError::UnresolvedIdentifier {
                scope: Scope::Metadata,
                ident,
                span: node.span,
            })
    }

    pub(crate) fn resolve_md_operand(
        &self,
        locals: &dyn LocalScope,
        operand: &ast::MdOperand,
    ) -> Result<MdOperand, ResolveError> {
        ensure_sufficient_stack(|| {
            Ok(match operand {
                ast::MdOperand::Null => MdOperand::Null,
                ast::MdOperand::Ref(node) => MdOperand::Node(self.resolve_md_ref(*node)?),
                ast::MdOperand::String(text) => MdOperand::String(*text),
                ast::MdOperand::Value(value) => {
                    MdOperand::Value(Box::new(self.resolve_typed_value(locals, value)?))
                }
                ast::MdOperand::Tuple(operands) => MdOperand::Tuple(
                    operands
                        .iter()
                        .map(|operand| self.resolve_md_operand(locals, operand))
                        .collect::<Result<_, _>>()?,
                ),
                ast::MdOperand::Specialized(node) => {
                    MdOperand::Specialized(Box::new(self.resolve_specialized(locals, node)?))
                }
            })
        })
    }

    pub(crate) fn resolve_attachments(
        &self,
        attachments: &[ast::MetadataAttachment],
    ) -> Result<Vec<MetadataAttachment>, ResolveError> {
        attachments
            .iter()
            .map(|attachment| {
                Ok(MetadataAttachment {
                    kind: attachment.kind,
                    node: self.resolve_md_ref(attachment.node)?,
                })
            })
            .collect()
    }
}
