//! Hash-consed type pool.
//!
//! Every type of a module is interned once, so type identity is `TypeId`
//! equality. A named type interns to one handle per identifier; its body is
//! stored beside it and may point back at the named handle, which closes
//! recursive types without ownership cycles.

use llr_ir::{FloatKind, Ident};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::TypeId;

/// A type whose component types are pool handles.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Void,
    Int(u32),
    Float(FloatKind),
    Label,
    Metadata,
    Token,
    Mmx,
    Pointer {
        elem: TypeId,
        addr_space: u32,
    },
    Array {
        len: u64,
        elem: TypeId,
    },
    Vector {
        len: u32,
        elem: TypeId,
        scalable: bool,
    },
    Struct {
        fields: Vec<TypeId>,
        packed: bool,
    },
    Function {
        ret: TypeId,
        params: Vec<TypeId>,
        variadic: bool,
    },
    /// `%name` or `%N`; the body lives in the pool.
    Named(Ident),
}

/// Body of a named type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NamedBody {
    Opaque,
    Type(TypeId),
}

/// Error when interning a type fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInternError {
    /// The pool exceeded `u32::MAX` types.
    Overflow,
}

impl std::fmt::Display for TypeInternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeInternError::Overflow => write!(f, "type pool exceeded u32::MAX types"),
        }
    }
}

impl std::error::Error for TypeInternError {}

impl TypeId {
    pub const VOID: TypeId = TypeId::new(0);
    pub const I1: TypeId = TypeId::new(1);
    pub const I8: TypeId = TypeId::new(2);
    pub const I16: TypeId = TypeId::new(3);
    pub const I32: TypeId = TypeId::new(4);
    pub const I64: TypeId = TypeId::new(5);
    pub const LABEL: TypeId = TypeId::new(6);
    pub const METADATA: TypeId = TypeId::new(7);
    pub const TOKEN: TypeId = TypeId::new(8);
}

struct PoolInner {
    map: FxHashMap<Type, u32>,
    types: Vec<Type>,
    /// Parallel to `types`; `Some` only for named types that have a body.
    bodies: Vec<Option<NamedBody>>,
}

impl PoolInner {
    fn with_primitives() -> Self {
        let mut inner = PoolInner {
            map: FxHashMap::default(),
            types: Vec::with_capacity(64),
            bodies: Vec::with_capacity(64),
        };

        // Fixed indices matching the `TypeId` constants.
        let primitives = [
            Type::Void,     // 0 = TypeId::VOID
            Type::Int(1),   // 1 = TypeId::I1
            Type::Int(8),   // 2 = TypeId::I8
            Type::Int(16),  // 3 = TypeId::I16
            Type::Int(32),  // 4 = TypeId::I32
            Type::Int(64),  // 5 = TypeId::I64
            Type::Label,    // 6 = TypeId::LABEL
            Type::Metadata, // 7 = TypeId::METADATA
            Type::Token,    // 8 = TypeId::TOKEN
        ];
        for (idx, ty) in primitives.into_iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "primitives count is fixed and small"
            )]
            let idx_u32 = idx as u32;
            inner.map.insert(ty.clone(), idx_u32);
            inner.types.push(ty);
            inner.bodies.push(None);
        }
        inner
    }
}

/// Append-only type pool shared by every phase.
///
/// # Thread Safety
/// One `RwLock` guards the pool. Lookups of existing types take the read
/// lock only, so parallel function resolvers contend only when they intern
/// a structural type nobody has needed before.
pub struct TypePool {
    inner: RwLock<PoolInner>,
}

impl TypePool {
    /// Create a pool with pre-interned primitives.
    pub fn new() -> Self {
        TypePool {
            inner: RwLock::new(PoolInner::with_primitives()),
        }
    }

    /// Try to intern a type, returning its handle or an error on overflow.
    pub fn try_intern(&self, ty: Type) -> Result<TypeId, TypeInternError> {
        // Fast path: already interned
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(&ty) {
                return Ok(TypeId::new(idx));
            }
        }

        let mut guard = self.inner.write();

        // Double-check after acquiring write lock
        if let Some(&idx) = guard.map.get(&ty) {
            return Ok(TypeId::new(idx));
        }

        let idx = u32::try_from(guard.types.len()).map_err(|_| TypeInternError::Overflow)?;
        guard.types.push(ty.clone());
        guard.bodies.push(None);
        guard.map.insert(ty, idx);
        Ok(TypeId::new(idx))
    }

    /// Intern a type.
    ///
    /// # Panics
    /// Panics if the pool overflows. Use [`Self::try_intern`] for fallible interning.
    pub fn intern(&self, ty: Type) -> TypeId {
        self.try_intern(ty).unwrap_or_else(|e| panic!("{}", e))
    }

    /// The type behind a handle.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this pool.
    pub fn get(&self, id: TypeId) -> Type {
        self.inner.read().types[id.index()].clone()
    }

    /// `elem*` in `addr_space`.
    pub fn pointer_to(&self, elem: TypeId, addr_space: u32) -> TypeId {
        self.intern(Type::Pointer { elem, addr_space })
    }

    /// `iN`.
    pub fn int(&self, bits: u32) -> TypeId {
        self.intern(Type::Int(bits))
    }

    /// Attach the body of a named type. A later call replaces the body.
    pub fn set_named_body(&self, named: TypeId, body: NamedBody) {
        self.inner.write().bodies[named.index()] = Some(body);
    }

    /// Body of a named type, `None` while it has none.
    pub fn named_body(&self, named: TypeId) -> Option<NamedBody> {
        self.inner.read().bodies[named.index()]
    }

    /// Follow named types to the first structural type.
    ///
    /// Opaque or bodiless named types (and alias cycles, which resolution
    /// rejects before any body is walked) resolve to themselves.
    pub fn resolve_named(&self, id: TypeId) -> TypeId {
        let guard = self.inner.read();
        let mut current = id;
        for _ in 0..guard.types.len() {
            match (&guard.types[current.index()], guard.bodies[current.index()]) {
                (Type::Named(_), Some(NamedBody::Type(body))) => current = body,
                _ => return current,
            }
        }
        current
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.inner.read().types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypePool").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llr_ir::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_primitives_are_pre_interned() {
        let pool = TypePool::new();
        assert_eq!(pool.intern(Type::Void), TypeId::VOID);
        assert_eq!(pool.int(1), TypeId::I1);
        assert_eq!(pool.int(32), TypeId::I32);
        assert_eq!(pool.intern(Type::Label), TypeId::LABEL);
        assert_eq!(pool.intern(Type::Token), TypeId::TOKEN);
    }

    #[test]
    fn test_structural_types_are_hash_consed() {
        let pool = TypePool::new();
        let a = pool.intern(Type::Struct {
            fields: vec![TypeId::I32, TypeId::I8],
            packed: false,
        });
        let b = pool.intern(Type::Struct {
            fields: vec![TypeId::I32, TypeId::I8],
            packed: false,
        });
        let packed = pool.intern(Type::Struct {
            fields: vec![TypeId::I32, TypeId::I8],
            packed: true,
        });
        assert_eq!(a, b);
        assert_ne!(a, packed);
        assert_eq!(pool.pointer_to(a, 0), pool.pointer_to(b, 0));
        assert_ne!(pool.pointer_to(a, 0), pool.pointer_to(a, 1));
    }

    #[test]
    fn test_recursive_named_type() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let node = pool.intern(Type::Named(Ident::Name(interner.intern("node"))));
        let next = pool.pointer_to(node, 0);
        let body = pool.intern(Type::Struct {
            fields: vec![TypeId::I32, next],
            packed: false,
        });
        assert_eq!(pool.named_body(node), None);
        pool.set_named_body(node, NamedBody::Type(body));

        assert_eq!(pool.named_body(node), Some(NamedBody::Type(body)));
        assert_eq!(pool.resolve_named(node), body);
        let Type::Pointer { elem, .. } = pool.get(next) else {
            panic!("expected a pointer");
        };
        assert_eq!(elem, node);
    }

    #[test]
    fn test_resolve_named_stops_at_opaque() {
        let interner = StringInterner::new();
        let pool = TypePool::new();
        let a = pool.intern(Type::Named(Ident::Name(interner.intern("a"))));
        let b = pool.intern(Type::Named(Ident::Name(interner.intern("b"))));
        pool.set_named_body(a, NamedBody::Type(b));
        pool.set_named_body(b, NamedBody::Opaque);
        assert_eq!(pool.resolve_named(a), b);
    }
}
