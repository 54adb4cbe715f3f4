//! `uselistorder` and `uselistorder_bb`.
//!
//! The value of a `uselistorder` is an ordinary constant. The function of a
//! `uselistorder_bb` resolves with the globals, but its block only binds
//! once every body exists.

use llr_ir::ast;
use llr_module::{Global, GlobalId, UseListOrder, UseListOrderBb};

use crate::blockaddress::BlockLookup;
use crate::scope::ModuleScope;
use crate::types::TypeCx;
use crate::ResolveError;

impl ModuleScope<'_> {
    #[tracing::instrument(level = "debug", skip_all, fields(orders = orders.len()))]
    pub(crate) fn resolve_use_list_orders(
        &self,
        orders: &[&ast::UseListOrder],
    ) -> Result<Vec<UseListOrder>, ResolveError> {
        orders
            .iter()
            .map(|order| {
                Ok(UseListOrder {
                    value: self.resolve_typed_const(&order.value)?,
                    indices: order.indices.clone(),
                })
            })
            .collect()
    }

    /// The function named by each `uselistorder_bb`.
    pub(crate) fn resolve_use_list_functions(
        &self,
        orders: &[&ast::UseListOrderBb],
    ) -> Result<Vec<GlobalId>, ResolveError> {
        orders
            .iter()
            .map(|order| {
                let id = self.resolve_global(order.func, order.func_span)?;
                let skeleton = self.skeleton(id);
                if !skeleton.is_function {
                    return Err(self.types.mismatch("function", skeleton.ty, order.func_span));
                }
                Ok(id)
            })
            .collect()
    }
}

/// Bind the block of each `uselistorder_bb` in its resolved function.
pub(crate) fn bind_use_list_blocks(
    orders: &[&ast::UseListOrderBb],
    funcs: &[GlobalId],
    types: &TypeCx<'_>,
    globals: &[Global],
) -> Result<Vec<UseListOrderBb>, ResolveError> {
    let mut blocks = BlockLookup::default();
    orders
        .iter()
        .zip(funcs)
        .map(|(order, &func)| {
            let block = blocks.find(types, globals, func, order.block.ident, order.block.span)?;
            Ok(UseListOrderBb {
                func,
                block,
                indices: order.indices.clone(),
            })
        })
        .collect()
}
