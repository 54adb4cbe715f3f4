//! Collision-checked identifier tables.
//!
//! One table per namespace: module types, module globals, comdats,
//! attribute groups, metadata IDs, and the locals of one function. A table
//! maps an [`Ident`] to a handle and remembers where each identifier was
//! declared, both for duplicate diagnostics and to replay declaration
//! order. After its phase the table is frozen into a [`FrozenTable`], which
//! only answers lookups and is shared read-only with later phases.

use llr_ir::{Ident, Span};
use rustc_hash::FxHashMap;

/// Mutable table used while a scope is being indexed.
#[derive(Clone, Debug)]
pub struct IdentTable<V> {
    map: FxHashMap<Ident, (V, Span)>,
    order: Vec<Ident>,
}

impl<V: Copy> IdentTable<V> {
    pub fn new() -> Self {
        IdentTable {
            map: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        IdentTable {
            map: FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Register `ident`. On collision the table is unchanged and the span
    /// of the first declaration is returned.
    pub fn declare(&mut self, ident: Ident, value: V, span: Span) -> Result<(), Span> {
        if let Some(&(_, first)) = self.map.get(&ident) {
            return Err(first);
        }
        self.map.insert(ident, (value, span));
        self.order.push(ident);
        Ok(())
    }

    pub fn resolve(&self, ident: Ident) -> Option<V> {
        self.map.get(&ident).map(|&(value, _)| value)
    }

    pub fn span_of(&self, ident: Ident) -> Option<Span> {
        self.map.get(&ident).map(|&(_, span)| span)
    }

    /// Handles in the order their identifiers were declared.
    pub fn all_in_declaration_order(&self) -> impl Iterator<Item = (Ident, V)> + '_ {
        self.order.iter().map(|ident| (*ident, self.map[ident].0))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn freeze(self) -> FrozenTable<V> {
        FrozenTable { inner: self }
    }
}

impl<V: Copy> Default for IdentTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished table. Lookups only.
#[derive(Clone, Debug)]
pub struct FrozenTable<V> {
    inner: IdentTable<V>,
}

impl<V: Copy> FrozenTable<V> {
    #[inline]
    pub fn resolve(&self, ident: Ident) -> Option<V> {
        self.inner.resolve(ident)
    }

    pub fn span_of(&self, ident: Ident) -> Option<Span> {
        self.inner.span_of(ident)
    }

    pub fn all_in_declaration_order(&self) -> impl Iterator<Item = (Ident, V)> + '_ {
        self.inner.all_in_declaration_order()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use llr_ir::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_and_resolve() {
        let interner = StringInterner::new();
        let foo = Ident::Name(interner.intern("foo"));
        let mut table = IdentTable::new();
        assert_eq!(table.declare(foo, 7u32, Span::new(0, 4)), Ok(()));
        assert_eq!(table.declare(Ident::Id(0), 8u32, Span::new(5, 7)), Ok(()));
        assert_eq!(table.resolve(foo), Some(7));
        assert_eq!(table.resolve(Ident::Id(0)), Some(8));
        assert_eq!(table.resolve(Ident::Id(1)), None);
        assert_eq!(table.span_of(foo), Some(Span::new(0, 4)));
    }

    #[test]
    fn test_collision_reports_first_span() {
        let interner = StringInterner::new();
        let foo = Ident::Name(interner.intern("foo"));
        let mut table = IdentTable::new();
        table.declare(foo, 1u32, Span::new(0, 4)).unwrap();
        assert_eq!(table.declare(foo, 2u32, Span::new(10, 14)), Err(Span::new(0, 4)));
        assert_eq!(table.resolve(foo), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_names_and_numbers_are_distinct() {
        let interner = StringInterner::new();
        let mut table = IdentTable::new();
        table.declare(Ident::Name(interner.intern("0")), 1u32, Span::DUMMY).unwrap();
        assert_eq!(table.declare(Ident::Id(0), 2u32, Span::DUMMY), Ok(()));
    }

    #[test]
    fn test_declaration_order_survives_freeze() {
        let interner = StringInterner::new();
        let names = ["zeta", "alpha", "mid"].map(|s| Ident::Name(interner.intern(s)));
        let mut table = IdentTable::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            table.declare(*name, idx, Span::DUMMY).unwrap();
        }
        let frozen = table.freeze();
        let order: Vec<_> = frozen.all_in_declaration_order().collect();
        assert_eq!(order, vec![(names[0], 0), (names[1], 1), (names[2], 2)]);
        assert_eq!(frozen.resolve(names[2]), Some(2));
    }
}
