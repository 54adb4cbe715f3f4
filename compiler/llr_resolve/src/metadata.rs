//! Metadata nodes and named metadata.
//!
//! Node IDs are indexed before any global so that attachments anywhere in
//! the module can name them; bodies are filled after the global skeletons
//! because operands may take the address of a global. A node may list
//! itself (`!0 = distinct !{!0}`).
//!
//! Specialized nodes (`!DILocation(...)`) keep their kind and fields as
//! written; only the operands inside them are resolved.

use llr_ir::ast::{self, MetadataDef, NamedMetadataDef};
use llr_ir::Ident;
use llr_module::{
    next_raw, MdField, MdFieldValue, MdNode, MetadataId, MetadataNode, NamedMetadata,
    SpecializedNode,
};

use crate::scope::{LocalScope, ModuleScope, NoLocals};
use crate::{IdentTable, ResolveError, Scope};

#[tracing::instrument(level = "debug", skip_all, fields(nodes = defs.len()))]
pub(crate) fn index_metadata(defs: &[&MetadataDef]) -> Result<IdentTable<MetadataId>, ResolveError> {
    let mut table = IdentTable::with_capacity(defs.len());
    for (idx, def) in defs.iter().enumerate() {
        let ident = Ident::Id(def.id);
        table
            .declare(ident, MetadataId::new(next_raw(idx)), def.span)
            .map_err(|first| ResolveError::DuplicateIdentifier {
                scope: Scope::Metadata,
                ident,
                first,
                second: def.span,
            })?;
    }
    Ok(table)
}

impl ModuleScope<'_> {
    /// Node bodies, in ID declaration order.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = defs.len()))]
    pub(crate) fn fill_metadata(&self, defs: &[&MetadataDef]) -> Result<Vec<MetadataNode>, ResolveError> {
        defs.iter()
            .map(|def| {
                let body = match &def.node {
                    ast::MdNode::Tuple(operands) => MdNode::Tuple(
                        operands
                            .iter()
                            .map(|operand| self.resolve_md_operand(&NoLocals, operand))
                            .collect::<Result<_, _>>()?,
                    ),
                    ast::MdNode::Specialized(node) => {
                        MdNode::Specialized(self.resolve_specialized(&NoLocals, node)?)
                    }
                };
                Ok(MetadataNode {
                    number: def.id,
                    distinct: def.distinct,
                    body,
                })
            })
            .collect()
    }

    pub(crate) fn resolve_specialized(
        &self,
        locals: &dyn LocalScope,
        node: &ast::SpecializedNode,
    ) -> Result<SpecializedNode, ResolveError> {
        let fields = node
            .fields
            .iter()
            .map(|field| {
                let value = match &field.value {
                    ast::MdFieldValue::Int(value) => MdFieldValue::Int(*value),
                    ast::MdFieldValue::String(text) => MdFieldValue::String(*text),
                    ast::MdFieldValue::Words(words) => MdFieldValue::Words(words.clone()),
                    ast::MdFieldValue::Operand(operand) => {
                        MdFieldValue::Operand(self.resolve_md_operand(locals, operand)?)
                    }
                };
                Ok(MdField {
                    key: field.key,
                    value,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(SpecializedNode {
            kind: node.kind,
            fields,
        })
    }

    pub(crate) fn resolve_named_metadata(
        &self,
        defs: &[&NamedMetadataDef],
    ) -> Result<Vec<NamedMetadata>, ResolveError> {
        defs.iter()
            .map(|def| {
                let nodes = def
                    .nodes
                    .iter()
                    .map(|node| self.resolve_md_ref(*node))
                    .collect::<Result<_, _>>()?;
                Ok(NamedMetadata {
                    name: def.name,
                    nodes,
                })
            })
            .collect()
    }
}
