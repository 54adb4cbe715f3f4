//! Implicit local numbering.
//!
//! Slots are visited in text order: parameters, then per block the block
//! itself, its instructions and its terminator. Every unnamed slot that
//! produces a value takes the next number; void slots take none.

use llr_ir::{Ident, Span};
use llr_module::{LocalIdent, LocalRef};

use crate::ResolveError;

/// One numbering candidate, with its result type already decided.
#[derive(Copy, Clone, Debug)]
pub(super) struct Slot {
    pub(super) local: LocalRef,
    /// Identifier as written: `%x`, `%3`, or nothing.
    pub(super) ident: Option<Ident>,
    pub(super) void: bool,
    pub(super) span: Span,
}

/// The identifier of every slot, in slot order.
///
/// A written number must equal the counter at that point. A void slot must
/// not be named.
pub(super) fn assign_numbers(
    function: Ident,
    slots: &[Slot],
) -> Result<Vec<LocalIdent>, ResolveError> {
    let mut next = 0u32;
    slots
        .iter()
        .map(|slot| match (slot.void, slot.ident) {
            (true, None) => Ok(LocalIdent::Unnamed),
            (true, Some(ident)) => Err(ResolveError::NamedVoidValue {
                function,
                ident,
                span: slot.span,
            }),
            (false, Some(Ident::Name(name))) => Ok(LocalIdent::Named(name)),
            (false, Some(Ident::Id(found))) if found != next => {
                Err(ResolveError::UnexpectedLocalId {
                    function,
                    expected: next,
                    found,
                    span: slot.span,
                })
            }
            (false, Some(Ident::Id(_)) | None) => {
                let id = next;
                next += 1;
                Ok(LocalIdent::Id(id))
            }
        })
        .collect()
}
