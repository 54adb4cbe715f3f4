//! Sharded string interner.
//!
//! Identifiers, keywords and string literals of an assembly file are interned
//! once by the lexer; every later phase compares `Name`s. The interner is
//! `Sync`, so parallel function-body resolution can look names up without
//! extra coordination.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One shard: a map from contents to index plus the index-ordered contents.
struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn new() -> Self {
        Shard {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(128),
        }
    }
}

/// Interning failed because a shard ran out of 28-bit indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternError {
    pub shard_idx: usize,
    pub count: usize,
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "interner shard {} is full ({} strings, max {})",
            self.shard_idx,
            self.count,
            Name::MAX_LOCAL
        )
    }
}

impl std::error::Error for InternError {}

/// Thread-safe string interner with per-shard `RwLock`s.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    total: AtomicUsize,
}

/// Words the lexer and parser see in nearly every module.
const PRELUDE: &[&str] = &[
    "define", "declare", "type", "global", "constant", "alias", "ifunc", "label", "void",
    "i1", "i8", "i16", "i32", "i64", "ptr", "to", "align", "entry", "x",
];

impl StringInterner {
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(Shard::new()));
        let interner = StringInterner {
            shards,
            total: AtomicUsize::new(0),
        };
        // Shard 0 index 0 must be the empty string so `Name::EMPTY` is valid.
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        for word in PRELUDE {
            interner.intern(word);
        }
        interner
    }

    /// Pick a shard from the first bytes of `s`. The empty string lands in 0.
    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern `s`, failing only if its shard is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx < NUM_SHARDS (16)"
        )]
        let shard_tag = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        if let Some(&local) = shard.read().map.get(s) {
            return Ok(Name::new(shard_tag, local));
        }

        let mut guard = shard.write();
        if let Some(&local) = guard.map.get(s) {
            return Ok(Name::new(shard_tag, local));
        }
        let count = guard.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&l| l <= Name::MAX_LOCAL)
            .ok_or(InternError { shard_idx, count })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.total.fetch_add(1, Ordering::Relaxed);
        Ok(Name::new(shard_tag, local))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if the shard is full (over 268 million strings in one shard).
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the contents of `name`.
    ///
    /// # Panics
    /// Panics if `name` came from a different interner.
    pub fn lookup(&self, name: Name) -> &str {
        let guard = self.shards[name.shard()].read();
        let s: &'static str = guard.strings[name.local()];
        s
    }

    /// Number of distinct strings interned, including the empty string.
    pub fn len(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
