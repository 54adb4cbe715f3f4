//! End-to-end: lex, parse, resolve, print.
//!
//! Canonical text must print back unchanged, and printing is idempotent for
//! any accepted input.

#![expect(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests panic on unexpected parse results"
)]

use llr_ir::{Ident, StringInterner};
use llr_module::{
    ConstExpr, Constant, GlobalId, GlobalKind, MdFieldValue, MdNode, MdOperand, Module, NamedBody,
    Type,
};
use llr_resolve::{resolve_module, ResolveOptions};
use pretty_assertions::assert_eq;

fn resolve_with(
    source: &str,
    options: ResolveOptions,
) -> (Module, StringInterner) {
    let interner = StringInterner::new();
    let tokens = llr_lexer::lex(source, &interner);
    let ast = llr_parse::parse(&tokens, &interner).expect("test source parses");
    let module = resolve_module(&ast, &interner, &options).expect("test source resolves");
    (module, interner)
}

fn print(source: &str) -> String {
    let (module, interner) = resolve_with(source, ResolveOptions::sequential());
    module.to_text(&interner)
}

/// `source` is already canonical, and stays so through a second pass.
fn assert_canonical(source: &str) {
    let once = print(source);
    assert_eq!(once, source);
    assert_eq!(print(&once), once);
}

fn global(module: &Module, interner: &StringInterner, name: &str) -> GlobalId {
    module
        .find_global(Ident::Name(interner.intern(name)))
        .unwrap_or_else(|| panic!("no global @{name}"))
}

fn init<'m>(module: &'m Module, id: GlobalId) -> &'m Constant {
    module.global(id).as_variable().unwrap().init.as_ref().unwrap()
}

// ── Canonical corpus ────────────────────────────────────────────────

const HEADER: &str = "\
source_filename = \"demo.c\"
target datalayout = \"e-m:e-i64:64\"
target triple = \"x86_64-unknown-linux-gnu\"
module asm \"nop\"
";

const GLOBALS: &str = "\
%node = type { i32, %node* }
%packed = type <{ i8, [4 x i16] }>
%handle = type opaque

$head = comdat any
$shared = comdat any

@head = global %node { i32 1, %node* @tail }, comdat
@tail = internal global %node { i32 2, %node* null }, comdat($shared)
@self = global i8* bitcast (i8** @self to i8*), align 8
@str = private unnamed_addr constant [3 x i8] c\"hi\\00\", section \".rodata\"
@ext = external global i32
@counter = thread_local global i32 0
@zero = global %packed zeroinitializer

@alias = alias %node, %node* @head
";

const IFUNCS: &str = "\
@zeta = ifunc void (), void ()* ()* @resolver
@alpha = ifunc void (), void ()* ()* @resolver

define void @impl() {
entry:
  ret void
}

define void ()* @resolver() {
entry:
  ret void ()* @impl
}
";

const FUNCTIONS: &str = "\
@fmt = private constant [4 x i8] c\"%d\\0A\\00\"

declare i32 @printf(i8* nocapture, ...)

define i32 @main(i32 %argc, i8** %argv) #0 {
entry:
  %fmt = getelementptr inbounds [4 x i8], [4 x i8]* @fmt, i64 0, i64 0
  %0 = call i32 (i8*, ...) @printf(i8* %fmt, i32 %argc)
  %cmp = icmp sgt i32 %argc, 1
  br i1 %cmp, label %many, label %one

many:
  %1 = add nsw i32 %argc, -1
  br label %one

one:
  %r = phi i32 [ 0, %entry ], [ %1, %many ]
  ret i32 %r
}

attributes #0 = { nounwind \"frame-pointer\"=\"all\" }
";

const EXCEPTIONS: &str = "\
declare void @may_throw()

declare i32 @__gxx_personality_v0(...)

define void @dispatch(i32 %v) personality i32 (...)* @__gxx_personality_v0 {
entry:
  switch i32 %v, label %done [
    i32 0, label %call
    i32 1, label %done
  ]

call:
  invoke void @may_throw() to label %done unwind label %lpad

lpad:
  %lp = landingpad { i8*, i32 }
          cleanup
          catch i8* null
  resume { i8*, i32 } %lp

done:
  unreachable
}
";

const EH_PADS: &str = "\
declare void @may_fail()

declare i32 @__CxxFrameHandler3(...)

define void @windows() personality i32 (...)* @__CxxFrameHandler3 {
entry:
  invoke void @may_fail() to label %done unwind label %dispatch

dispatch:
  %cs = catchswitch within none [label %handler] unwind label %cleanup

handler:
  %cp = catchpad within %cs [i8* null, i32 64, i8* null]
  catchret from %cp to label %done

cleanup:
  %cl = cleanuppad within none []
  cleanupret from %cl unwind to caller

done:
  ret void
}

define i32 @jump(i32 %x) {
entry:
  %r = callbr i32 asm \"\", \"=r,r,!i\"(i32 %x) to label %fallthrough [label %indirect]

fallthrough:
  ret i32 %r

indirect:
  ret i32 0
}
";

const METADATA: &str = "\
@target = global i8* blockaddress(@later, %bb)

define void @later() !dbg !0 {
entry:
  br label %bb, !dbg !1

bb:
  ret void
}

!llvm.dbg.cu = !{!0}

!0 = distinct !{!0, !\"self\"}
!1 = !{i32 7, null}
";

const DEBUG_INFO: &str = "\
@dbg_var = global i32 0

define void @traced() !dbg !13 {
entry:
  call void @llvm.dbg.value(metadata i32* @dbg_var, metadata !14, metadata !DIExpression(DW_OP_deref)), !dbg !15
  br label %exit

exit:
  ret void
}

declare void @llvm.dbg.value(metadata, metadata, metadata)

uselistorder i32* @dbg_var, { 1, 0 }
uselistorder_bb @traced, %exit, { 0, 1 }

!llvm.ident = !{!10}

!10 = distinct !DICompileUnit(language: DW_LANG_C99, file: !11, producer: \"clang\", isOptimized: false, emissionKind: FullDebug)
!11 = !DIFile(filename: \"a.c\", directory: \"/tmp\")
!12 = !DIBasicType(name: \"int\", size: 32, encoding: DW_ATE_signed)
!13 = distinct !DISubprogram(name: \"traced\", scope: !11, line: 1, flags: DIFlagPrototyped | DIFlagAllCallsDescribed, unit: !10, retainedNodes: !{})
!14 = !DILocalVariable(name: \"x\", arg: 1, scope: !13, line: -1, type: !12)
!15 = !DILocation(line: 2, column: 3, scope: !13)
!16 = !DIGlobalVariableExpression(var: !17, expr: !DIExpression())
!17 = !DITemplateValueParameter(name: \"p\", type: !12, value: i32* @dbg_var)
";

#[test]
fn test_header_fields_round_trip() {
    assert_canonical(HEADER);
}

#[test]
fn test_globals_round_trip() {
    assert_canonical(GLOBALS);
}

#[test]
fn test_ifuncs_round_trip() {
    assert_canonical(IFUNCS);
}

#[test]
fn test_functions_round_trip() {
    assert_canonical(FUNCTIONS);
}

#[test]
fn test_exception_handling_round_trip() {
    assert_canonical(EXCEPTIONS);
}

#[test]
fn test_exception_pads_and_callbr_round_trip() {
    assert_canonical(EH_PADS);
}

#[test]
fn test_debug_info_and_use_lists_round_trip() {
    assert_canonical(DEBUG_INFO);
}

#[test]
fn test_metadata_and_blockaddress_round_trip() {
    assert_canonical(METADATA);
}

#[test]
fn test_implicit_numbering_prints_explicitly() {
    let text = print(
        "define i32 @f(i32) {\n\
           %2 = add i32 %0, 1\n\
           ret i32 %2\n\
         }",
    );
    assert_eq!(
        text,
        "define i32 @f(i32 %0) {\n\
         1:\n\
         \x20 %2 = add i32 %0, 1\n\
         \x20 ret i32 %2\n\
         }\n"
    );
    assert_eq!(print(&text), text);
}

#[test]
fn test_float_literals_print_canonically() {
    let text = print(
        "define double @f() {\n\
         entry:\n\
           %x = fadd double 1.0, 0x3FB999999999999A\n\
           ret double %x\n\
         }",
    );
    assert_eq!(
        text,
        "define double @f() {\n\
         entry:\n\
         \x20 %x = fadd double 1.000000e+00, 1.000000e-01\n\
         \x20 ret double %x\n\
         }\n"
    );
}

#[test]
fn test_combined_corpus_is_idempotent() {
    let source = [GLOBALS, IFUNCS, FUNCTIONS, EXCEPTIONS, EH_PADS, DEBUG_INFO, METADATA].join("\n");
    let once = print(&source);
    assert_eq!(print(&once), once);
}

// ── Identity of forward and self references ─────────────────────────

#[test]
fn test_forward_global_reference_is_identity() {
    let (module, interner) = resolve_with(GLOBALS, ResolveOptions::sequential());
    let head = global(&module, &interner, "head");
    let tail = global(&module, &interner, "tail");
    let Constant::Struct { fields, .. } = init(&module, head) else {
        panic!("expected a struct initializer");
    };
    assert!(matches!(fields[1], Constant::Global { id, .. } if id == tail));
    assert_eq!(module.globals.len(), 8);
}

#[test]
fn test_ifunc_resolver_is_identity() {
    let (module, interner) = resolve_with(IFUNCS, ResolveOptions::sequential());
    let resolver = global(&module, &interner, "resolver");
    let names: Vec<_> = module
        .ifuncs
        .iter()
        .map(|&id| module.global(id).ident)
        .collect();
    assert_eq!(
        names,
        vec![
            Ident::Name(interner.intern("zeta")),
            Ident::Name(interner.intern("alpha")),
        ]
    );
    for &id in &module.ifuncs {
        let GlobalKind::IFunc(indirect) = &module.global(id).kind else {
            panic!("expected an ifunc");
        };
        assert!(matches!(indirect.target, Constant::Global { id, .. } if id == resolver));
    }
    assert!(module.aliases.is_empty());
}

#[test]
fn test_self_reference_is_identity() {
    let (module, interner) = resolve_with(GLOBALS, ResolveOptions::sequential());
    let this = global(&module, &interner, "self");
    let Constant::Expr { expr, .. } = init(&module, this) else {
        panic!("expected a cast");
    };
    let ConstExpr::Cast { value, .. } = &**expr else {
        panic!("expected a cast");
    };
    assert!(matches!(value, Constant::Global { id, .. } if *id == this));
}

#[test]
fn test_recursive_type_points_at_itself() {
    let (module, _) = resolve_with(GLOBALS, ResolveOptions::sequential());
    let node = module.type_defs[0];
    let Some(NamedBody::Type(body)) = module.types.named_body(node) else {
        panic!("expected a body");
    };
    let Type::Struct { fields, .. } = module.types.get(body) else {
        panic!("expected a struct");
    };
    assert_eq!(
        module.types.get(fields[1]),
        Type::Pointer {
            elem: node,
            addr_space: 0
        }
    );
}

#[test]
fn test_blockaddress_binds_a_later_function() {
    let (module, interner) = resolve_with(METADATA, ResolveOptions::sequential());
    let later = global(&module, &interner, "later");
    let target = global(&module, &interner, "target");
    let Constant::BlockAddress { slot, .. } = init(&module, target) else {
        panic!("expected a block address");
    };
    let address = module.block_address(*slot);
    assert_eq!(address.func, later);
    let body = module.function(later).unwrap().body.as_ref().unwrap();
    assert_eq!(
        body.block(address.block).ident.to_ident(),
        Some(Ident::Name(interner.intern("bb")))
    );
}

#[test]
fn test_self_referencing_metadata() {
    let (module, _) = resolve_with(METADATA, ResolveOptions::sequential());
    let first = &module.metadata[0];
    assert!(first.distinct);
    let MdNode::Tuple(operands) = &first.body else {
        panic!("expected a tuple");
    };
    assert!(matches!(
        operands[0],
        MdOperand::Node(id) if module.metadata_node(id).number == 0
    ));
}

#[test]
fn test_specialized_fields_resolve_to_nodes_and_globals() {
    let (module, interner) = resolve_with(DEBUG_INFO, ResolveOptions::sequential());
    let dbg_var = global(&module, &interner, "dbg_var");
    let specialized = |number: u32| {
        let node = module
            .metadata
            .iter()
            .find(|node| node.number == number)
            .unwrap();
        let MdNode::Specialized(node) = &node.body else {
            panic!("!{number} is not specialized");
        };
        node
    };

    let location = specialized(15);
    assert_eq!(location.kind, interner.intern("DILocation"));
    let Some(MdFieldValue::Operand(MdOperand::Node(scope))) =
        location.field(interner.intern("scope"))
    else {
        panic!("expected a node reference");
    };
    assert_eq!(module.metadata_node(*scope).number, 13);
    assert_eq!(
        location.field(interner.intern("line")),
        Some(&MdFieldValue::Int(2))
    );

    let param = specialized(17);
    let Some(MdFieldValue::Operand(MdOperand::Value(value))) =
        param.field(interner.intern("value"))
    else {
        panic!("expected a typed value");
    };
    assert!(matches!(
        **value,
        llr_module::Value::Const(Constant::Global { id, .. }) if id == dbg_var
    ));
}

#[test]
fn test_use_list_orders_bind_their_targets() {
    let (module, interner) = resolve_with(DEBUG_INFO, ResolveOptions::sequential());
    let dbg_var = global(&module, &interner, "dbg_var");
    let traced = global(&module, &interner, "traced");

    assert_eq!(module.use_list_orders.len(), 1);
    let order = &module.use_list_orders[0];
    assert!(matches!(order.value, Constant::Global { id, .. } if id == dbg_var));
    assert_eq!(order.indices, [1, 0]);

    let order = &module.use_list_order_bbs[0];
    assert_eq!(order.func, traced);
    let body = module.function(traced).unwrap().body.as_ref().unwrap();
    assert_eq!(
        body.block(order.block).ident.to_ident(),
        Some(Ident::Name(interner.intern("exit")))
    );
}

#[test]
fn test_per_kind_lists_keep_declaration_order() {
    let (module, interner) = resolve_with(FUNCTIONS, ResolveOptions::sequential());
    let names: Vec<_> = module
        .functions
        .iter()
        .map(|&id| module.global(id).ident)
        .collect();
    assert_eq!(
        names,
        vec![
            Ident::Name(interner.intern("printf")),
            Ident::Name(interner.intern("main")),
        ]
    );
    assert_eq!(module.variables.len(), 1);
    assert!(matches!(
        module.global(module.variables[0]).kind,
        GlobalKind::Variable(_)
    ));
}

// ── Parallel bodies ─────────────────────────────────────────────────

#[test]
fn test_parallel_matches_sequential() {
    let mut source = String::from(METADATA);
    for idx in 0..32 {
        source.push_str(&format!(
            "\ndefine i32 @f{idx}(i32 %x) {{\n\
             entry:\n\
             \x20 %y = mul i32 %x, {idx}\n\
             \x20 %p = alloca i32, align 4\n\
             \x20 store i32 %y, i32* %p\n\
             \x20 call void @later()\n\
             \x20 indirectbr i8* blockaddress(@later, %bb), [label %entry]\n\
             }}\n"
        ));
    }
    let (sequential, seq_interner) = resolve_with(&source, ResolveOptions::sequential());
    let (parallel, par_interner) = resolve_with(&source, ResolveOptions::parallel());
    assert_eq!(
        parallel.to_text(&par_interner),
        sequential.to_text(&seq_interner)
    );
    assert_eq!(sequential.block_addresses.len(), 33);

    // Slot numbering follows scheduling; the bound targets do not.
    let targets = |module: &Module| {
        let mut pairs: Vec<_> = module
            .block_addresses
            .iter()
            .map(|address| (address.func, address.block))
            .collect();
        pairs.sort();
        pairs
    };
    assert_eq!(targets(&parallel), targets(&sequential));
}
