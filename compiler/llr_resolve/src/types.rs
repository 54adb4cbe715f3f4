//! Type resolution.
//!
//! Named types resolve in two phases over one table:
//!
//! 1. **Index**: every `%name = type ...` interns its `Named` handle and
//!    declares it. Opaque definitions may repeat, and an opaque name may
//!    later receive a body.
//! 2. **Fill**: each body is translated and attached to its handle. A
//!    nested `%name` only needs the handle, never the body, so self and
//!    mutual recursion close without a second pass.
//!
//! The post-conditions (every name has a body, no name is an alias of
//! itself) are checked by [`check_types`].

use llr_ir::ast::{ParsedType, TypeDef, TypeDefBody};
use llr_ir::{Ident, Span, StringInterner};
use llr_module::print::type_text;
use llr_module::{NamedBody, Type, TypeId, TypePool};
use llr_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::{FrozenTable, IdentTable, ResolveError, Scope};

/// Resolves type expressions against the frozen type-name table.
pub(crate) struct TypeCx<'a> {
    pub(crate) pool: &'a TypePool,
    pub(crate) names: FrozenTable<TypeId>,
    pub(crate) interner: &'a StringInterner,
}

/// A `getelementptr` index: its type and, when written as an integer
/// literal, its value.
#[derive(Copy, Clone, Debug)]
pub(crate) struct GepIndex {
    pub(crate) ty: TypeId,
    pub(crate) constant: Option<i128>,
}

// ── Phases ──────────────────────────────────────────────────────────

/// Phase 1: declare every named type.
#[tracing::instrument(level = "debug", skip_all, fields(defs = defs.len()))]
pub(crate) fn index_types(
    defs: &[&TypeDef],
    pool: &TypePool,
) -> Result<IdentTable<TypeId>, ResolveError> {
    let mut table = IdentTable::with_capacity(defs.len());
    let mut with_body = FxHashSet::default();
    for def in defs {
        let named = pool.intern(Type::Named(def.ident));
        if let Err(first) = table.declare(def.ident, named, def.span) {
            if with_body.contains(&def.ident) {
                return Err(ResolveError::DuplicateIdentifier {
                    scope: Scope::Type,
                    ident: def.ident,
                    first,
                    second: def.span,
                });
            }
        }
        if matches!(def.body, TypeDefBody::Type(_)) {
            with_body.insert(def.ident);
        }
    }
    debug!(names = table.len(), "indexed named types");
    Ok(table)
}

/// Phase 2: attach every body.
#[tracing::instrument(level = "debug", skip_all, fields(defs = defs.len()))]
pub(crate) fn fill_types(cx: &TypeCx<'_>, defs: &[&TypeDef]) -> Result<(), ResolveError> {
    for def in defs {
        let Some(named) = cx.names.resolve(def.ident) else {
            return Err(ResolveError::malformed("type definition was not indexed", def.span));
        };
        match &def.body {
            TypeDefBody::Opaque => {
                if cx.pool.named_body(named).is_none() {
                    cx.pool.set_named_body(named, NamedBody::Opaque);
                }
            }
            TypeDefBody::Type(body) => {
                let body = cx.resolve(body)?;
                cx.pool.set_named_body(named, NamedBody::Type(body));
            }
        }
        trace!(ty = %cx.text(named), "filled named type");
    }
    Ok(())
}

/// Post-conditions: no bodiless name, no alias cycle.
pub(crate) fn check_types(cx: &TypeCx<'_>) -> Result<(), ResolveError> {
    for (ident, named) in cx.names.all_in_declaration_order() {
        let span = cx.names.span_of(ident).unwrap_or(Span::DUMMY);
        if cx.pool.named_body(named).is_none() {
            return Err(ResolveError::UnresolvedType { ident, span });
        }
        if let Some(names) = cx.alias_cycle(named) {
            return Err(ResolveError::SelfReferentialType { names, span });
        }
    }
    Ok(())
}

// ── Type expressions ────────────────────────────────────────────────

impl TypeCx<'_> {
    pub(crate) fn resolve(&self, ty: &ParsedType) -> Result<TypeId, ResolveError> {
        ensure_sufficient_stack(|| self.resolve_inner(ty))
    }

    fn resolve_inner(&self, ty: &ParsedType) -> Result<TypeId, ResolveError> {
        let structural = match ty {
            ParsedType::Void => Type::Void,
            ParsedType::Int(bits) => Type::Int(*bits),
            ParsedType::Float(kind) => Type::Float(*kind),
            ParsedType::Label => Type::Label,
            ParsedType::Metadata => Type::Metadata,
            ParsedType::Token => Type::Token,
            ParsedType::Mmx => Type::Mmx,
            ParsedType::Pointer { elem, addr_space } => Type::Pointer {
                elem: self.resolve(elem)?,
                addr_space: *addr_space,
            },
            ParsedType::Array { len, elem } => Type::Array {
                len: *len,
                elem: self.resolve(elem)?,
            },
            ParsedType::Vector {
                len,
                elem,
                scalable,
            } => Type::Vector {
                len: *len,
                elem: self.resolve(elem)?,
                scalable: *scalable,
            },
            ParsedType::Struct { fields, packed } => Type::Struct {
                fields: self.resolve_all(fields)?,
                packed: *packed,
            },
            ParsedType::Function {
                ret,
                params,
                variadic,
            } => Type::Function {
                ret: self.resolve(ret)?,
                params: self.resolve_all(params)?,
                variadic: *variadic,
            },
            ParsedType::Named { ident, span } => {
                return self
                    .names
                    .resolve(*ident)
                    .ok_or(ResolveError::UnresolvedIdentifier {
                        scope: Scope::Type,
                        ident: *ident,
                        span: *span,
                    });
            }
        };
        Ok(self.pool.intern(structural))
    }

    pub(crate) fn resolve_all(&self, types: &[ParsedType]) -> Result<Vec<TypeId>, ResolveError> {
        types.iter().map(|ty| self.resolve(ty)).collect()
    }

    /// The names of a cycle starting and ending at `start`, if its body is
    /// a chain of named types leading back to it.
    fn alias_cycle(&self, start: TypeId) -> Option<Vec<Ident>> {
        let mut chain = vec![start];
        let mut current = start;
        while let Some(NamedBody::Type(body)) = self.pool.named_body(current) {
            if !matches!(self.pool.get(body), Type::Named(_)) || chain[1..].contains(&body) {
                return None;
            }
            chain.push(body);
            if body == start {
                let names = chain
                    .into_iter()
                    .filter_map(|id| match self.pool.get(id) {
                        Type::Named(ident) => Some(ident),
                        _ => None,
                    })
                    .collect();
                return Some(names);
            }
            current = body;
        }
        None
    }

    // ── Structure queries ───────────────────────────────────────────

    /// The type behind any chain of named types.
    pub(crate) fn structural(&self, id: TypeId) -> Type {
        self.pool.get(self.pool.resolve_named(id))
    }

    pub(crate) fn text(&self, id: TypeId) -> String {
        type_text(self.pool, self.interner, id)
    }

    pub(crate) fn mismatch(&self, expected: impl Into<String>, found: TypeId, span: Span) -> ResolveError {
        ResolveError::TypeMismatch {
            expected: expected.into(),
            found: self.text(found),
            span,
        }
    }

    /// Whether `id` is a pointer to a function type.
    pub(crate) fn is_function_pointer(&self, id: TypeId) -> bool {
        match self.structural(id) {
            Type::Pointer { elem, .. } => matches!(self.structural(elem), Type::Function { .. }),
            _ => false,
        }
    }

    pub(crate) fn vector_element(&self, vector: TypeId, span: Span) -> Result<TypeId, ResolveError> {
        match self.structural(vector) {
            Type::Vector { elem, .. } => Ok(elem),
            _ => Err(self.mismatch("vector type", vector, span)),
        }
    }

    /// `i1`, or `<N x i1>` for vector operands.
    pub(crate) fn compare_result(&self, operand: TypeId) -> TypeId {
        match self.structural(operand) {
            Type::Vector { len, scalable, .. } => self.pool.intern(Type::Vector {
                len,
                elem: TypeId::I1,
                scalable,
            }),
            _ => TypeId::I1,
        }
    }

    /// Vector of `mask` length with the element type of `lhs`.
    pub(crate) fn shuffle_result(
        &self,
        lhs: TypeId,
        mask: TypeId,
        span: Span,
    ) -> Result<TypeId, ResolveError> {
        let elem = self.vector_element(lhs, span)?;
        match self.structural(mask) {
            Type::Vector { len, scalable, .. } => Ok(self.pool.intern(Type::Vector {
                len,
                elem,
                scalable,
            })),
            _ => Err(self.mismatch("vector mask", mask, span)),
        }
    }

    /// The member type reached by `extractvalue` indices.
    pub(crate) fn member_type(
        &self,
        aggregate: TypeId,
        indices: &[u32],
        span: Span,
    ) -> Result<TypeId, ResolveError> {
        let mut current = aggregate;
        for &index in indices {
            let member = match self.structural(current) {
                Type::Struct { fields, .. } => fields.get(index as usize).copied(),
                Type::Array { len, elem } => (u64::from(index) < len).then_some(elem),
                _ => return Err(self.mismatch("aggregate type", current, span)),
            };
            current = member.ok_or_else(|| {
                self.mismatch(format!("aggregate with an element {index}"), current, span)
            })?;
        }
        Ok(current)
    }

    /// Result of `getelementptr`: a pointer to the element reached from
    /// `source`, or a vector of such pointers when the base or any index is
    /// a vector.
    pub(crate) fn gep_result(
        &self,
        source: TypeId,
        base: TypeId,
        indices: &[GepIndex],
        span: Span,
    ) -> Result<TypeId, ResolveError> {
        let (addr_space, mut vector) = match self.structural(base) {
            Type::Pointer { addr_space, .. } => (addr_space, None),
            Type::Vector {
                len,
                elem,
                scalable,
            } => match self.structural(elem) {
                Type::Pointer { addr_space, .. } => (addr_space, Some((len, scalable))),
                _ => return Err(self.mismatch("vector of pointers", base, span)),
            },
            _ => return Err(self.mismatch("pointer type", base, span)),
        };

        let mut current = source;
        for (position, index) in indices.iter().enumerate() {
            if let Type::Vector { len, scalable, .. } = self.structural(index.ty) {
                vector.get_or_insert((len, scalable));
            }
            // The first index steps over the pointer itself.
            if position == 0 {
                continue;
            }
            current = match self.structural(current) {
                Type::Struct { fields, .. } => {
                    let field = index
                        .constant
                        .and_then(|value| usize::try_from(value).ok())
                        .and_then(|value| fields.get(value).copied());
                    field.ok_or_else(|| {
                        ResolveError::invalid_constant(
                            format!(
                                "struct index into `{}` must be an in-range integer literal",
                                self.text(current)
                            ),
                            span,
                        )
                    })?
                }
                Type::Array { elem, .. } | Type::Vector { elem, .. } => elem,
                _ => return Err(self.mismatch("aggregate type", current, span)),
            };
        }

        let pointer = self.pool.pointer_to(current, addr_space);
        Ok(match vector {
            Some((len, scalable)) => self.pool.intern(Type::Vector {
                len,
                elem: pointer,
                scalable,
            }),
            None => pointer,
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(interner: &StringInterner, name: &str) -> ParsedType {
        ParsedType::Named {
            ident: Ident::Name(interner.intern(name)),
            span: Span::DUMMY,
        }
    }

    fn def(interner: &StringInterner, name: &str, body: TypeDefBody) -> TypeDef {
        TypeDef {
            ident: Ident::Name(interner.intern(name)),
            span: Span::DUMMY,
            body,
        }
    }

    fn resolve_defs<'a>(
        pool: &'a TypePool,
        interner: &'a StringInterner,
        defs: &[TypeDef],
    ) -> Result<TypeCx<'a>, ResolveError> {
        let defs: Vec<&TypeDef> = defs.iter().collect();
        let names = index_types(&defs, pool)?.freeze();
        let cx = TypeCx {
            pool,
            names,
            interner,
        };
        fill_types(&cx, &defs)?;
        check_types(&cx)?;
        Ok(cx)
    }

    #[test]
    fn test_recursive_struct_points_at_itself() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let node = def(
            &interner,
            "node",
            TypeDefBody::Type(ParsedType::Struct {
                fields: vec![
                    ParsedType::Int(32),
                    ParsedType::pointer_to(named(&interner, "node")),
                ],
                packed: false,
            }),
        );
        let cx = resolve_defs(&pool, &interner, &[node]).unwrap();
        let handle = cx.names.resolve(Ident::Name(interner.intern("node"))).unwrap();
        let Type::Struct { fields, .. } = cx.structural(handle) else {
            panic!("expected a struct body");
        };
        assert_eq!(
            pool.get(fields[1]),
            Type::Pointer {
                elem: handle,
                addr_space: 0
            }
        );
    }

    #[test]
    fn test_mutual_recursion_and_forward_names() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let a = def(
            &interner,
            "a",
            TypeDefBody::Type(ParsedType::Struct {
                fields: vec![ParsedType::pointer_to(named(&interner, "b"))],
                packed: false,
            }),
        );
        let b = def(
            &interner,
            "b",
            TypeDefBody::Type(ParsedType::Struct {
                fields: vec![ParsedType::pointer_to(named(&interner, "a"))],
                packed: false,
            }),
        );
        let cx = resolve_defs(&pool, &interner, &[a, b]).unwrap();
        assert_eq!(cx.text(cx.names.resolve(Ident::Name(interner.intern("a"))).unwrap()), "%a");
    }

    #[test]
    fn test_opaque_then_body_is_accepted() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let defs = [
            def(&interner, "t", TypeDefBody::Opaque),
            def(&interner, "t", TypeDefBody::Opaque),
            def(&interner, "t", TypeDefBody::Type(ParsedType::Int(8))),
        ];
        let cx = resolve_defs(&pool, &interner, &defs).unwrap();
        let handle = cx.names.resolve(Ident::Name(interner.intern("t"))).unwrap();
        assert_eq!(pool.named_body(handle), Some(NamedBody::Type(TypeId::I8)));
        assert_eq!(cx.names.len(), 1);
    }

    #[test]
    fn test_body_then_redefinition_is_duplicate() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let defs = [
            def(&interner, "t", TypeDefBody::Type(ParsedType::Int(8))),
            def(&interner, "t", TypeDefBody::Opaque),
        ];
        let err = resolve_defs(&pool, &interner, &defs).map(|_| ()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::DuplicateIdentifier {
                scope: Scope::Type,
                ..
            }
        ));
    }

    #[test]
    fn test_alias_cycle_is_rejected() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let defs = [
            def(&interner, "b", TypeDefBody::Type(named(&interner, "c"))),
            def(&interner, "c", TypeDefBody::Type(named(&interner, "b"))),
        ];
        let err = resolve_defs(&pool, &interner, &defs).map(|_| ()).unwrap_err();
        let ResolveError::SelfReferentialType { names, .. } = err else {
            panic!("expected a cycle, got {err:?}");
        };
        let text: Vec<_> = names.iter().map(|n| n.to_text('%', &interner)).collect();
        assert_eq!(text, ["%b", "%c", "%b"]);
    }

    #[test]
    fn test_bodiless_name_is_unresolved_type() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let ghost = Ident::Name(interner.intern("ghost"));
        let mut table = IdentTable::new();
        table
            .declare(ghost, pool.intern(Type::Named(ghost)), Span::new(0, 6))
            .unwrap();
        let cx = TypeCx {
            pool: &pool,
            names: table.freeze(),
            interner: &interner,
        };
        assert_eq!(
            check_types(&cx),
            Err(ResolveError::UnresolvedType {
                ident: ghost,
                span: Span::new(0, 6)
            })
        );
    }

    #[test]
    fn test_undefined_name_in_body() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let defs = [def(&interner, "a", TypeDefBody::Type(named(&interner, "missing")))];
        let err = resolve_defs(&pool, &interner, &defs).map(|_| ()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnresolvedIdentifier {
                scope: Scope::Type,
                ..
            }
        ));
    }

    #[test]
    fn test_gep_walks_structs_and_arrays() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let cx = resolve_defs(&pool, &interner, &[]).unwrap();
        let array = pool.intern(Type::Array {
            len: 4,
            elem: TypeId::I16,
        });
        let pair = pool.intern(Type::Struct {
            fields: vec![TypeId::I8, array],
            packed: false,
        });
        let base = pool.pointer_to(pair, 0);
        let index = |value| GepIndex {
            ty: TypeId::I32,
            constant: Some(value),
        };
        let result = cx
            .gep_result(pair, base, &[index(0), index(1), index(2)], Span::DUMMY)
            .unwrap();
        assert_eq!(result, pool.pointer_to(TypeId::I16, 0));

        let err = cx
            .gep_result(pair, base, &[index(0), index(5)], Span::DUMMY)
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidConstant { .. }));
    }

    #[test]
    fn test_member_type_past_end_is_mismatch() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let cx = resolve_defs(&pool, &interner, &[]).unwrap();
        let pair = pool.intern(Type::Struct {
            fields: vec![TypeId::I8, TypeId::I32],
            packed: false,
        });
        assert_eq!(cx.member_type(pair, &[1], Span::DUMMY), Ok(TypeId::I32));
        assert_eq!(
            cx.member_type(pair, &[2], Span::DUMMY),
            Err(ResolveError::TypeMismatch {
                expected: "aggregate with an element 2".to_owned(),
                found: "{ i8, i32 }".to_owned(),
                span: Span::DUMMY,
            })
        );
    }
}
