//! Arena handles.
//!
//! Every entity of a resolved module lives in an arena and is referenced by
//! a `u32` handle, so cyclic references (a global taking its own address, a
//! struct pointing to itself, a phi naming a later block) are plain indices.

/// Define `u32` handle newtypes.
///
/// Each generated type has:
/// - `new(raw)`, `raw()`, `index()`
/// - `Debug` showing `TypeName(raw)`
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

define_id!(
    /// Handle into the module's `TypePool`. Equal handles are equal types.
    TypeId,
    /// Handle into `Module::globals` (variables, aliases, ifuncs, functions).
    GlobalId,
    /// Handle into `Module::comdats`.
    ComdatId,
    /// Basic block within one function body.
    BlockId,
    /// Non-terminator instruction within one function body.
    InstId,
    /// Handle into `Module::attr_groups`.
    AttrGroupId,
    /// Handle into `Module::metadata`.
    MetadataId,
    /// Handle into `Module::block_addresses`.
    BlockAddressId,
);

/// Convert an arena length to the next handle value.
///
/// # Panics
/// Panics if the arena exceeds `u32::MAX` entries.
#[inline]
pub fn next_raw(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena exceeded {} entries", u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_handle_accessors() {
        let id = BlockId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{id:?}"), "BlockId(7)");
        assert!(InstId::new(1) < InstId::new(2));
    }

    #[test]
    fn test_next_raw() {
        assert_eq!(next_raw(0), 0);
        assert_eq!(next_raw(41), 41);
    }
}
