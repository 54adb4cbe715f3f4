//! Resolver configuration.

/// Options for [`resolve_module`](crate::resolve_module).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ResolveOptions {
    /// Resolve function bodies on the rayon thread pool once every module
    /// table is frozen.
    ///
    /// The printed module and any reported error match sequential
    /// resolution. The numbering of `Module::block_addresses` slots and of
    /// types first interned inside a body follows scheduling order, so two
    /// `Module` values from parallel runs need not compare equal.
    pub parallel: bool,
}

impl ResolveOptions {
    pub fn sequential() -> Self {
        ResolveOptions { parallel: false }
    }

    pub fn parallel() -> Self {
        ResolveOptions { parallel: true }
    }
}
