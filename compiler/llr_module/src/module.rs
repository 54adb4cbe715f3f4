//! The resolved module.

use llr_ir::{Ident, Name, StringInterner};

use crate::print::ModuleDisplay;
use crate::{
    AttrGroup, AttrGroupId, BlockAddress, BlockAddressId, Comdat, ComdatId, Function, Global,
    GlobalId, MetadataId, MetadataNode, NamedMetadata, TypeId, TypePool, UseListOrder,
    UseListOrderBb,
};

/// A fully cross-referenced module.
///
/// Every collection keeps source declaration order. `globals` holds all
/// four kinds of global entity; the per-kind lists index into it.
#[derive(Debug, Default)]
pub struct Module {
    pub source_filename: Option<Name>,
    pub data_layout: Option<Name>,
    pub target_triple: Option<Name>,
    pub module_asm: Vec<Name>,

    pub types: TypePool,
    /// Named types, in order of first definition.
    pub type_defs: Vec<TypeId>,
    pub comdats: Vec<Comdat>,

    pub globals: Vec<Global>,
    pub variables: Vec<GlobalId>,
    pub aliases: Vec<GlobalId>,
    pub ifuncs: Vec<GlobalId>,
    pub functions: Vec<GlobalId>,

    pub use_list_orders: Vec<UseListOrder>,
    pub use_list_order_bbs: Vec<UseListOrderBb>,

    pub attr_groups: Vec<AttrGroup>,
    pub metadata: Vec<MetadataNode>,
    pub named_metadata: Vec<NamedMetadata>,
    pub block_addresses: Vec<BlockAddress>,
}

impl Module {
    pub fn new() -> Self {
        Module::default()
    }

    pub fn global(&self, id: GlobalId) -> &Global {
        &self.globals[id.index()]
    }

    /// The function behind `id`, `None` for other global kinds.
    pub fn function(&self, id: GlobalId) -> Option<&Function> {
        self.global(id).as_function()
    }

    pub fn comdat(&self, id: ComdatId) -> &Comdat {
        &self.comdats[id.index()]
    }

    pub fn attr_group(&self, id: AttrGroupId) -> &AttrGroup {
        &self.attr_groups[id.index()]
    }

    pub fn metadata_node(&self, id: MetadataId) -> &MetadataNode {
        &self.metadata[id.index()]
    }

    pub fn block_address(&self, id: BlockAddressId) -> BlockAddress {
        self.block_addresses[id.index()]
    }

    /// Linear lookup of a global by identifier.
    pub fn find_global(&self, ident: Ident) -> Option<GlobalId> {
        self.globals
            .iter()
            .position(|global| global.ident == ident)
            .map(|idx| GlobalId::new(crate::next_raw(idx)))
    }

    /// Canonical assembly text.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ModuleDisplay<'a> {
        ModuleDisplay::new(self, interner)
    }

    pub fn to_text(&self, interner: &StringInterner) -> String {
        self.display(interner).to_string()
    }
}
