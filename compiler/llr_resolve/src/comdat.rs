//! Comdat groups.
//!
//! Comdats have no forward references of their own: they are indexed once,
//! before any global, and only read afterwards.

use llr_ir::ast::{ComdatDef, ComdatRef};
use llr_ir::{Ident, Span};
use llr_module::{next_raw, Comdat, ComdatId};

use crate::{FrozenTable, IdentTable, ResolveError, Scope};

#[tracing::instrument(level = "debug", skip_all, fields(comdats = defs.len()))]
pub(crate) fn index_comdats(
    defs: &[&ComdatDef],
) -> Result<(IdentTable<ComdatId>, Vec<Comdat>), ResolveError> {
    let mut table = IdentTable::with_capacity(defs.len());
    let mut comdats = Vec::with_capacity(defs.len());
    for def in defs {
        let ident = Ident::Name(def.name);
        let id = ComdatId::new(next_raw(comdats.len()));
        table
            .declare(ident, id, def.span)
            .map_err(|first| ResolveError::DuplicateIdentifier {
                scope: Scope::Comdat,
                ident,
                first,
                second: def.span,
            })?;
        comdats.push(Comdat {
            name: def.name,
            kind: def.kind,
        });
    }
    Ok((table, comdats))
}

/// Resolve `comdat` (named like `symbol`) or `comdat($name)`.
pub(crate) fn resolve_comdat_ref(
    table: &FrozenTable<ComdatId>,
    symbol: Ident,
    symbol_span: Span,
    comdat: ComdatRef,
) -> Result<ComdatId, ResolveError> {
    let (ident, span) = match comdat {
        ComdatRef::Implicit => (symbol, symbol_span),
        ComdatRef::Named { name, span } => (Ident::Name(name), span),
    };
    table
        .resolve(ident)
        .ok_or(ResolveError::UnresolvedIdentifier {
            scope: Scope::Comdat,
            ident,
            span,
        })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use llr_ir::{ComdatKind, StringInterner};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_implicit_ref_uses_symbol_name() {
        let interner = StringInterner::new();
        let name = interner.intern("f");
        let def = ComdatDef {
            name,
            span: Span::new(0, 2),
            kind: ComdatKind::Any,
        };
        let (table, comdats) = index_comdats(&[&def]).unwrap();
        let table = table.freeze();
        assert_eq!(comdats.len(), 1);
        assert_eq!(
            resolve_comdat_ref(&table, Ident::Name(name), Span::DUMMY, ComdatRef::Implicit),
            Ok(ComdatId::new(0))
        );
        let err = resolve_comdat_ref(&table, Ident::Id(0), Span::new(3, 5), ComdatRef::Implicit);
        assert_eq!(
            err,
            Err(ResolveError::UnresolvedIdentifier {
                scope: Scope::Comdat,
                ident: Ident::Id(0),
                span: Span::new(3, 5),
            })
        );
    }

    #[test]
    fn test_duplicate_comdat() {
        let interner = StringInterner::new();
        let name = interner.intern("c");
        let first = ComdatDef {
            name,
            span: Span::new(0, 2),
            kind: ComdatKind::Any,
        };
        let second = ComdatDef {
            span: Span::new(20, 22),
            ..first
        };
        let err = index_comdats(&[&first, &second]).map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DuplicateIdentifier {
                scope: Scope::Comdat,
                ident: Ident::Name(name),
                first: Span::new(0, 2),
                second: Span::new(20, 22),
            }
        );
    }
}
