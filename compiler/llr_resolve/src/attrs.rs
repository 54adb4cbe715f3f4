//! Attributes and attribute groups.

use llr_ir::ast::{self, AttrGroupDef};
use llr_ir::Ident;
use llr_module::{next_raw, AttrGroup, AttrGroupId, FuncAttr, ParamAttr};

use crate::types::TypeCx;
use crate::{FrozenTable, IdentTable, ResolveError, Scope};

#[tracing::instrument(level = "debug", skip_all, fields(groups = defs.len()))]
pub(crate) fn index_attr_groups(
    defs: &[&AttrGroupDef],
) -> Result<IdentTable<AttrGroupId>, ResolveError> {
    let mut table = IdentTable::with_capacity(defs.len());
    for (idx, def) in defs.iter().enumerate() {
        let ident = Ident::Id(def.id);
        table
            .declare(ident, AttrGroupId::new(next_raw(idx)), def.span)
            .map_err(|first| ResolveError::DuplicateIdentifier {
                scope: Scope::AttrGroup,
                ident,
                first,
                second: def.span,
            })?;
    }
    Ok(table)
}

/// Group bodies, in declaration order. A group may name another group.
pub(crate) fn fill_attr_groups(
    groups: &FrozenTable<AttrGroupId>,
    defs: &[&AttrGroupDef],
) -> Result<Vec<AttrGroup>, ResolveError> {
    defs.iter()
        .map(|def| {
            Ok(AttrGroup {
                number: def.id,
                attrs: resolve_func_attrs(groups, &def.attrs)?,
            })
        })
        .collect()
}

pub(crate) fn resolve_param_attrs(
    types: &TypeCx<'_>,
    attrs: &[ast::ParamAttr],
) -> Result<Vec<ParamAttr>, ResolveError> {
    attrs
        .iter()
        .map(|attr| {
            Ok(match attr {
                ast::ParamAttr::Flag(name) => ParamAttr::Flag(*name),
                ast::ParamAttr::Align(align) => ParamAttr::Align(*align),
                ast::ParamAttr::Int { key, value } => ParamAttr::Int {
                    key: *key,
                    value: *value,
                },
                ast::ParamAttr::Type { key, ty } => ParamAttr::Type {
                    key: *key,
                    ty: types.resolve(ty)?,
                },
                ast::ParamAttr::Str { key, value } => ParamAttr::Str {
                    key: *key,
                    value: *value,
                },
            })
        })
        .collect()
}

pub(crate) fn resolve_func_attrs(
    groups: &FrozenTable<AttrGroupId>,
    attrs: &[ast::FuncAttr],
) -> Result<Vec<FuncAttr>, ResolveError> {
    attrs
        .iter()
        .map(|attr| {
            Ok(match attr {
                ast::FuncAttr::Flag(name) => FuncAttr::Flag(*name),
                ast::FuncAttr::Int { key, value } => FuncAttr::Int {
                    key: *key,
                    value: *value,
                },
                ast::FuncAttr::Str { key, value } => FuncAttr::Str {
                    key: *key,
                    value: *value,
                },
                ast::FuncAttr::Group { id, span } => {
                    let ident = Ident::Id(*id);
                    let group = groups.resolve(ident).ok_or(ResolveError::UnresolvedIdentifier {
                        scope: Scope::AttrGroup,
                        ident,
                        span: *span,
                    })?;
                    FuncAttr::Group(group)
                }
            })
        })
        .collect()
}
