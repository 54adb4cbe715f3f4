//! Module builder.
//!
//! Runs every phase in dependency order. Each table is frozen before the
//! phase that reads it starts, so function bodies see immutable tables and
//! can be resolved in parallel.

use llr_ir::ast::{
    self, AttrGroupDef, ComdatDef, FuncDef, MetadataDef, NamedMetadataDef, TopLevelEntity,
    TypeDef, UseListOrder, UseListOrderBb,
};
use llr_ir::{Name, StringInterner};
use llr_module::{next_raw, GlobalId, GlobalKind, Module, TypePool};
use rayon::prelude::*;
use tracing::debug;

use crate::attrs::{fill_attr_groups, index_attr_groups};
use crate::blockaddress::BlockAddressLog;
use crate::comdat::index_comdats;
use crate::globals::{index_globals, GlobalEntity};
use crate::locals::{resolve_body, ResolvedBody};
use crate::metadata::index_metadata;
use crate::scope::ModuleScope;
use crate::types::{check_types, fill_types, index_types, TypeCx};
use crate::uselist::bind_use_list_blocks;
use crate::{ResolveError, ResolveOptions};

/// Top-level entities grouped by the phase that consumes them, in source
/// order within each group.
#[derive(Default)]
struct Entities<'a> {
    source_filename: Option<Name>,
    data_layout: Option<Name>,
    target_triple: Option<Name>,
    module_asm: Vec<Name>,
    types: Vec<&'a TypeDef>,
    comdats: Vec<&'a ComdatDef>,
    attr_groups: Vec<&'a AttrGroupDef>,
    metadata: Vec<&'a MetadataDef>,
    named_metadata: Vec<&'a NamedMetadataDef>,
    use_list_orders: Vec<&'a UseListOrder>,
    use_list_order_bbs: Vec<&'a UseListOrderBb>,
    globals: Vec<GlobalEntity<'a>>,
}

impl<'a> Entities<'a> {
    fn collect(module: &'a ast::Module) -> Self {
        let mut entities = Entities::default();
        for entity in &module.entities {
            match entity {
                TopLevelEntity::SourceFilename(name) => entities.source_filename = Some(*name),
                TopLevelEntity::DataLayout(name) => entities.data_layout = Some(*name),
                TopLevelEntity::TargetTriple(name) => entities.target_triple = Some(*name),
                TopLevelEntity::ModuleAsm(name) => entities.module_asm.push(*name),
                TopLevelEntity::TypeDef(def) => entities.types.push(def),
                TopLevelEntity::Comdat(def) => entities.comdats.push(def),
                TopLevelEntity::Global(decl) => entities.globals.push(GlobalEntity::Variable(decl)),
                TopLevelEntity::IndirectSymbol(def) => {
                    entities.globals.push(GlobalEntity::Indirect(def));
                }
                TopLevelEntity::FuncDecl(header) => {
                    entities.globals.push(GlobalEntity::Declaration(header));
                }
                TopLevelEntity::FuncDef(def) => entities.globals.push(GlobalEntity::Definition(def)),
                TopLevelEntity::AttrGroup(def) => entities.attr_groups.push(def),
                TopLevelEntity::NamedMetadata(def) => entities.named_metadata.push(def),
                TopLevelEntity::Metadata(def) => entities.metadata.push(def),
                TopLevelEntity::UseListOrder(order) => entities.use_list_orders.push(order),
                TopLevelEntity::UseListOrderBb(order) => entities.use_list_order_bbs.push(order),
            }
        }
        entities
    }

    /// Function definitions with the handle of their global.
    fn definitions(&self) -> Vec<(GlobalId, &'a FuncDef)> {
        self.globals
            .iter()
            .enumerate()
            .filter_map(|(idx, entity)| match entity {
                GlobalEntity::Definition(def) => Some((GlobalId::new(next_raw(idx)), *def)),
                _ => None,
            })
            .collect()
    }
}

/// Resolve a parsed module into a cross-referenced [`Module`].
///
/// Resolution stops at the first error.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(entities = module.entities.len(), parallel = options.parallel)
)]
pub fn resolve_module(
    module: &ast::Module,
    interner: &StringInterner,
    options: &ResolveOptions,
) -> Result<Module, ResolveError> {
    let pool = TypePool::new();
    let mut resolved = build(module, interner, options, &pool)?;
    resolved.types = pool;
    debug!(
        types = resolved.types.len(),
        globals = resolved.globals.len(),
        "module resolved"
    );
    Ok(resolved)
}

/// Every phase except handing over the type pool.
fn build(
    module: &ast::Module,
    interner: &StringInterner,
    options: &ResolveOptions,
    pool: &TypePool,
) -> Result<Module, ResolveError> {
    let entities = Entities::collect(module);

    let (comdat_table, comdats) = index_comdats(&entities.comdats)?;

    let types = TypeCx {
        pool,
        names: index_types(&entities.types, pool)?.freeze(),
        interner,
    };
    fill_types(&types, &entities.types)?;
    check_types(&types)?;
    debug!(named = types.names.len(), "types resolved");

    let attr_table = index_attr_groups(&entities.attr_groups)?.freeze();
    let attr_groups = fill_attr_groups(&attr_table, &entities.attr_groups)?;
    let metadata_table = index_metadata(&entities.metadata)?.freeze();

    let (global_table, skeletons) = index_globals(&types, &entities.globals)?;
    debug!(globals = global_table.len(), "global skeletons created");

    let scope = ModuleScope {
        types,
        comdats: comdat_table.freeze(),
        attr_groups: attr_table,
        metadata: metadata_table,
        globals: global_table.freeze(),
        skeletons,
        block_addresses: BlockAddressLog::default(),
    };

    let metadata = scope.fill_metadata(&entities.metadata)?;
    let named_metadata = scope.resolve_named_metadata(&entities.named_metadata)?;
    let mut globals = scope
        .globals
        .all_in_declaration_order()
        .zip(&entities.globals)
        .map(|((_, id), &entity)| scope.fill_global(id, entity))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(globals = globals.len(), "global bodies filled");
    let use_list_orders = scope.resolve_use_list_orders(&entities.use_list_orders)?;
    let use_list_funcs = scope.resolve_use_list_functions(&entities.use_list_order_bbs)?;

    let definitions = entities.definitions();
    let bodies = resolve_bodies(&scope, &definitions, options)?;
    for ((id, def), resolved) in definitions.iter().zip(bodies) {
        let GlobalKind::Function(func) = &mut globals[id.index()].kind else {
            return Err(ResolveError::malformed(
                "function definition without a function global",
                def.header.span,
            ));
        };
        for (param, ident) in func.params.iter_mut().zip(resolved.params) {
            param.ident = ident;
        }
        func.body = Some(resolved.body);
    }
    debug!(functions = definitions.len(), "function bodies resolved");

    let type_defs = scope
        .types
        .names
        .all_in_declaration_order()
        .map(|(_, id)| id)
        .collect();
    let mut module = Module {
        source_filename: entities.source_filename,
        data_layout: entities.data_layout,
        target_triple: entities.target_triple,
        module_asm: entities.module_asm,
        type_defs,
        comdats,
        attr_groups,
        metadata,
        named_metadata,
        use_list_orders,
        ..Module::default()
    };
    for (_, id) in scope.globals.all_in_declaration_order() {
        let list = match &globals[id.index()].kind {
            GlobalKind::Variable(_) => &mut module.variables,
            GlobalKind::Alias(_) => &mut module.aliases,
            GlobalKind::IFunc(_) => &mut module.ifuncs,
            GlobalKind::Function(_) => &mut module.functions,
        };
        list.push(id);
    }

    let ModuleScope {
        types,
        block_addresses,
        ..
    } = scope;
    module.block_addresses = block_addresses.fix_up(&types, &globals)?;
    module.use_list_order_bbs = bind_use_list_blocks(
        &entities.use_list_order_bbs,
        &use_list_funcs,
        &types,
        &globals,
    )?;
    module.globals = globals;
    Ok(module)
}

/// Resolve every body. In parallel mode all bodies run to completion and
/// the error of the earliest failing function is returned.
fn resolve_bodies(
    scope: &ModuleScope<'_>,
    definitions: &[(GlobalId, &FuncDef)],
    options: &ResolveOptions,
) -> Result<Vec<ResolvedBody>, ResolveError> {
    if options.parallel {
        let results: Vec<_> = definitions
            .par_iter()
            .map(|&(id, def)| resolve_body(scope, id, def))
            .collect();
        results.into_iter().collect()
    } else {
        definitions
            .iter()
            .map(|&(id, def)| resolve_body(scope, id, def))
            .collect()
    }
}
