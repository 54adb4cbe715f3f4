//! Interned string handle.

use std::fmt;

/// Handle to a string stored in a [`StringInterner`](crate::StringInterner).
///
/// Layout: the top 4 bits select the interner shard, the low 28 bits index
/// into it. Equality and hashing are plain `u32` operations.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, pre-interned in shard 0.
    pub const EMPTY: Name = Name(0);

    /// Largest index a single shard can hand out.
    pub const MAX_LOCAL: u32 = 0x0FFF_FFFF;

    /// Number of interner shards.
    pub const NUM_SHARDS: usize = 16;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << 28) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trips() {
        let name = Name::new(7, 4242);
        assert_eq!(name.shard(), 7);
        assert_eq!(name.local(), 4242);
        assert_eq!(name.raw() >> 28, 7);
    }

    #[test]
    fn test_empty_is_shard_zero() {
        assert_eq!(Name::EMPTY.shard(), 0);
        assert_eq!(Name::EMPTY.local(), 0);
        assert_eq!(Name::default(), Name::EMPTY);
    }
}
