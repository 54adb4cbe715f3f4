//! Global variables, aliases, ifuncs and function headers.
//!
//! Phase 1 declares every symbol in one shared namespace and fixes its
//! type: a pointer to the content type or signature. Phase 2 fills each
//! body against the frozen [`ModuleScope`]; since every skeleton exists by
//! then, initializers may refer forward or to themselves.

use llr_ir::ast::{FuncDef, FuncHeader, GlobalDecl, IndirectKind, IndirectSymbolDef, TypedConst};
use llr_ir::{Ident, Span, SymbolAttrs};
use llr_module::{
    next_raw, Function, Global, GlobalId, GlobalKind, Indirect, LocalIdent, MetadataAttachment,
    Param, Variable,
};
use tracing::trace;

use crate::attrs::{resolve_func_attrs, resolve_param_attrs};
use crate::comdat::resolve_comdat_ref;
use crate::scope::{GlobalSkeleton, ModuleScope};
use crate::types::TypeCx;
use crate::{IdentTable, ResolveError, Scope};

/// A top-level entity in the global namespace.
#[derive(Copy, Clone, Debug)]
pub(crate) enum GlobalEntity<'a> {
    Variable(&'a GlobalDecl),
    Indirect(&'a IndirectSymbolDef),
    Declaration(&'a FuncHeader),
    Definition(&'a FuncDef),
}

impl GlobalEntity<'_> {
    pub(crate) fn ident(self) -> Ident {
        match self {
            GlobalEntity::Variable(decl) => decl.ident,
            GlobalEntity::Indirect(def) => def.ident,
            GlobalEntity::Declaration(header) => header.ident,
            GlobalEntity::Definition(def) => def.header.ident,
        }
    }

    pub(crate) fn span(self) -> Span {
        match self {
            GlobalEntity::Variable(decl) => decl.span,
            GlobalEntity::Indirect(def) => def.span,
            GlobalEntity::Declaration(header) => header.span,
            GlobalEntity::Definition(def) => def.header.span,
        }
    }
}

/// Everything of a resolved global except its identifier and type.
type SymbolParts = (SymbolAttrs, Vec<MetadataAttachment>, GlobalKind);

/// Phase 1: declare every global and compute its type.
#[tracing::instrument(level = "debug", skip_all, fields(globals = entities.len()))]
pub(crate) fn index_globals(
    types: &TypeCx<'_>,
    entities: &[GlobalEntity<'_>],
) -> Result<(IdentTable<GlobalId>, Vec<GlobalSkeleton>), ResolveError> {
    let mut table = IdentTable::with_capacity(entities.len());
    let mut skeletons = Vec::with_capacity(entities.len());
    for &entity in entities {
        let id = GlobalId::new(next_raw(skeletons.len()));
        table
            .declare(entity.ident(), id, entity.span())
            .map_err(|first| ResolveError::DuplicateIdentifier {
                scope: Scope::Global,
                ident: entity.ident(),
                first,
                second: entity.span(),
            })?;

        let (content, addr_space, is_function) = match entity {
            GlobalEntity::Variable(decl) => {
                (types.resolve(&decl.content_ty)?, decl.attrs.addr_space, false)
            }
            GlobalEntity::Indirect(def) => {
                (types.resolve(&def.content_ty)?, def.attrs.addr_space, false)
            }
            GlobalEntity::Declaration(header) => {
                (types.resolve(&header.signature())?, header.attrs.addr_space, true)
            }
            GlobalEntity::Definition(def) => (
                types.resolve(&def.header.signature())?,
                def.header.attrs.addr_space,
                true,
            ),
        };
        skeletons.push(GlobalSkeleton {
            ty: types.pool.pointer_to(content, addr_space),
            content,
            is_function,
        });
        trace!(global = %entity.ident().to_text('@', types.interner), "global skeleton");
    }
    Ok((table, skeletons))
}

impl ModuleScope<'_> {
    /// Phase 2 for one global. Function bodies are resolved later.
    pub(crate) fn fill_global(
        &self,
        id: GlobalId,
        entity: GlobalEntity<'_>,
    ) -> Result<Global, ResolveError> {
        let skeleton = self.skeleton(id);
        let (attrs, metadata, kind) = match entity {
            GlobalEntity::Variable(decl) => {
                let init = decl
                    .init
                    .as_ref()
                    .map(|(value, span)| self.resolve_const(skeleton.content, value, *span))
                    .transpose()?;
                let comdat = decl
                    .comdat
                    .map(|comdat| resolve_comdat_ref(&self.comdats, decl.ident, decl.span, comdat))
                    .transpose()?;
                let variable = Variable {
                    content_ty: skeleton.content,
                    constant: decl.constant,
                    externally_initialized: decl.externally_initialized,
                    init,
                    section: decl.section,
                    comdat,
                    align: decl.align,
                };
                (
                    decl.attrs,
                    self.resolve_attachments(&decl.metadata)?,
                    GlobalKind::Variable(variable),
                )
            }
            GlobalEntity::Indirect(def) => {
                let indirect = Indirect {
                    content_ty: skeleton.content,
                    target: self.resolve_typed_const(&def.target)?,
                };
                let kind = match def.kind {
                    IndirectKind::Alias => GlobalKind::Alias(indirect),
                    IndirectKind::IFunc => GlobalKind::IFunc(indirect),
                };
                (def.attrs, Vec::new(), kind)
            }
            GlobalEntity::Declaration(header) => self.fill_header(header, skeleton)?,
            GlobalEntity::Definition(def) => self.fill_header(&def.header, skeleton)?,
        };
        Ok(Global {
            ident: entity.ident(),
            ty: skeleton.ty,
            attrs,
            metadata,
            kind,
        })
    }

    fn fill_header(
        &self,
        header: &FuncHeader,
        skeleton: GlobalSkeleton,
    ) -> Result<SymbolParts, ResolveError> {
        let types = &self.types;
        let params = header
            .params
            .iter()
            .map(|param| {
                Ok(Param {
                    ty: types.resolve(&param.ty)?,
                    attrs: resolve_param_attrs(types, &param.attrs)?,
                    // Definitions get their numbering from the body resolver.
                    ident: LocalIdent::Unnamed,
                })
            })
            .collect::<Result<Vec<_>, ResolveError>>()?;
        let optional = |constant: &Option<TypedConst>| {
            constant
                .as_ref()
                .map(|constant| self.resolve_typed_const(constant))
                .transpose()
        };
        let function = Function {
            sig: skeleton.content,
            cconv: header.cconv,
            ret_attrs: resolve_param_attrs(types, &header.ret_attrs)?,
            params,
            fn_attrs: resolve_func_attrs(&self.attr_groups, &header.fn_attrs)?,
            section: header.section,
            comdat: header
                .comdat
                .map(|comdat| resolve_comdat_ref(&self.comdats, header.ident, header.span, comdat))
                .transpose()?,
            align: header.align,
            gc: header.gc,
            prefix: optional(&header.prefix)?,
            prologue: optional(&header.prologue)?,
            personality: optional(&header.personality)?,
            body: None,
        };
        Ok((
            header.attrs,
            self.resolve_attachments(&header.metadata)?,
            GlobalKind::Function(Box::new(function)),
        ))
    }
}
