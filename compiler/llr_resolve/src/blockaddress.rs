//! `blockaddress(@f, %bb)` fix-up.
//!
//! A block address can appear in a global initializer or in another
//! function long before `@f`'s body is resolved, so the constant only
//! records a slot. Once every body exists, each slot is bound to the
//! `BlockId` of `%bb` in `@f`. `uselistorder_bb` binds its block through
//! the same [`BlockLookup`].

use llr_ir::{Ident, Span};
use llr_module::{next_raw, BlockAddress, BlockAddressId, BlockId, Global, GlobalId};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::types::TypeCx;
use crate::{ResolveError, Scope};

#[derive(Copy, Clone, Debug)]
struct PendingBlockAddress {
    func: GlobalId,
    block: Ident,
    span: Span,
}

/// Slots handed out during resolution. Appends from concurrent function
/// resolvers are serialized by the lock; a slot is its index.
#[derive(Debug, Default)]
pub(crate) struct BlockAddressLog {
    pending: Mutex<Vec<PendingBlockAddress>>,
}

impl BlockAddressLog {
    pub(crate) fn record(&self, func: GlobalId, block: Ident, span: Span) -> BlockAddressId {
        let mut pending = self.pending.lock();
        let slot = BlockAddressId::new(next_raw(pending.len()));
        pending.push(PendingBlockAddress { func, block, span });
        slot
    }

    /// Bind every slot to its block.
    ///
    /// In parallel mode slots are numbered in whatever order the bodies
    /// ran, so on failure the reference that comes first in the source is
    /// reported rather than the first recorded.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn fix_up(
        self,
        types: &TypeCx<'_>,
        globals: &[Global],
    ) -> Result<Vec<BlockAddress>, ResolveError> {
        let pending = self.pending.into_inner();
        let mut blocks = BlockLookup::default();
        let mut resolved = Vec::with_capacity(pending.len());
        let mut earliest: Option<ResolveError> = None;

        for entry in pending {
            match blocks.find(types, globals, entry.func, entry.block, entry.span) {
                Ok(block) => resolved.push(BlockAddress {
                    func: entry.func,
                    block,
                }),
                Err(err) => {
                    let replaces = match &earliest {
                        Some(seen) => err.span().start < seen.span().start,
                        None => true,
                    };
                    if replaces {
                        earliest = Some(err);
                    }
                }
            }
        }
        if let Some(err) = earliest {
            return Err(err);
        }
        tracing::debug!(count = resolved.len(), "fixed up block addresses");
        Ok(resolved)
    }
}

/// `%bb` lookup in resolved bodies, one index per function built on first
/// use.
#[derive(Debug, Default)]
pub(crate) struct BlockLookup {
    indices: FxHashMap<GlobalId, FxHashMap<Ident, BlockId>>,
}

impl BlockLookup {
    pub(crate) fn find(
        &mut self,
        types: &TypeCx<'_>,
        globals: &[Global],
        func_id: GlobalId,
        block: Ident,
        span: Span,
    ) -> Result<BlockId, ResolveError> {
        let global = &globals[func_id.index()];
        let unresolved = ResolveError::UnresolvedIdentifier {
            scope: Scope::Local {
                function: global.ident,
            },
            ident: block,
            span,
        };
        let Some(func) = global.as_function() else {
            return Err(ResolveError::malformed("block lookup in a non-function", span));
        };
        let Some(body) = &func.body else {
            return Err(unresolved);
        };

        let blocks = self.indices.entry(func_id).or_insert_with(|| {
            body.iter_blocks()
                .filter_map(|(id, block)| block.ident.to_ident().map(|ident| (ident, id)))
                .collect()
        });
        if let Some(&id) = blocks.get(&block) {
            return Ok(id);
        }

        // Named, but not a block.
        let wanted = Some(block);
        let local_ty = func
            .params
            .iter()
            .find(|param| param.ident.to_ident() == wanted)
            .map(|param| param.ty)
            .or_else(|| {
                body.insts
                    .iter()
                    .find(|inst| inst.ident.to_ident() == wanted)
                    .map(|inst| inst.ty)
            })
            .or_else(|| {
                body.blocks
                    .iter()
                    .find(|block| block.term.ident.to_ident() == wanted)
                    .map(|block| block.term.ty)
            });
        Err(match local_ty {
            Some(ty) => types.mismatch("basic block", ty, span),
            None => unresolved,
        })
    }
}
