//! Well-formed input.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::parse_source;
use llr_ir::ast::{
    ComdatRef, ConstExpr, FuncAttr, InstKind, MdFieldValue, MdNode, MdOperand, ParamAttr,
    ParsedConst, ParsedType, TermKind, TopLevelEntity, TypeDefBody, ValueKind,
};
use llr_ir::{ArithFlags, BinaryOp, ComdatKind, Ident, Linkage, Preemption, UnnamedAddr};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_header_fields() {
    let (module, interner) = parse_source(
        r#"source_filename = "a.c"
target datalayout = "e-m:e"
target triple = "x86_64-unknown-linux-gnu"
module asm "nop""#,
    );
    let module = module.unwrap();
    assert_eq!(
        module.entities,
        vec![
            TopLevelEntity::SourceFilename(interner.intern("a.c")),
            TopLevelEntity::DataLayout(interner.intern("e-m:e")),
            TopLevelEntity::TargetTriple(interner.intern("x86_64-unknown-linux-gnu")),
            TopLevelEntity::ModuleAsm(interner.intern("nop")),
        ]
    );
}

#[test]
fn test_parse_type_defs() {
    let (module, interner) = parse_source(
        "%node = type { i32, %node* }\n%opaque = type opaque\n%packed = type <{ i8, [4 x i16] }>",
    );
    let module = module.unwrap();
    let TopLevelEntity::TypeDef(node) = &module.entities[0] else {
        panic!("expected a type definition");
    };
    assert_eq!(node.ident, Ident::Name(interner.intern("node")));
    let TypeDefBody::Type(ParsedType::Struct { fields, packed }) = &node.body else {
        panic!("expected a struct body");
    };
    assert!(!packed);
    assert_eq!(fields[0], ParsedType::Int(32));
    assert!(matches!(
        &fields[1],
        ParsedType::Pointer { elem, addr_space: 0 }
            if matches!(**elem, ParsedType::Named { ident: Ident::Name(_), .. })
    ));

    let TopLevelEntity::TypeDef(opaque) = &module.entities[1] else {
        panic!("expected a type definition");
    };
    assert_eq!(opaque.body, TypeDefBody::Opaque);

    let TopLevelEntity::TypeDef(packed) = &module.entities[2] else {
        panic!("expected a type definition");
    };
    assert_eq!(
        packed.body,
        TypeDefBody::Type(ParsedType::Struct {
            fields: vec![
                ParsedType::Int(8),
                ParsedType::Array {
                    len: 4,
                    elem: Box::new(ParsedType::Int(16)),
                },
            ],
            packed: true,
        })
    );
}

#[test]
fn test_parse_function_pointer_types() {
    let (module, _) = parse_source("@fp = global i32 (i8*, ...)* null");
    let module = module.unwrap();
    let TopLevelEntity::Global(global) = &module.entities[0] else {
        panic!("expected a global");
    };
    let ParsedType::Pointer { elem, .. } = &global.content_ty else {
        panic!("expected a pointer");
    };
    assert_eq!(
        **elem,
        ParsedType::Function {
            ret: Box::new(ParsedType::Int(32)),
            params: vec![ParsedType::pointer_to(ParsedType::Int(8))],
            variadic: true,
        }
    );
    assert_eq!(global.init.as_ref().map(|(c, _)| c), Some(&ParsedConst::Null));
}

#[test]
fn test_parse_globals_and_comdats() {
    let (module, interner) = parse_source(
        r#"$c = comdat any
$old = comdat noduplicates
@x = dso_local unnamed_addr constant [3 x i8] c"ab\00", section ".rodata", comdat($c), align 1
@c = linkonce_odr global i32 0, comdat
@ext = external global i32
@tls = internal thread_local(initialexec) global i32 7"#,
    );
    let module = module.unwrap();
    assert!(matches!(
        &module.entities[0],
        TopLevelEntity::Comdat(def) if def.kind == ComdatKind::Any
    ));
    assert!(matches!(
        &module.entities[1],
        TopLevelEntity::Comdat(def) if def.kind == ComdatKind::NoDeduplicate
    ));

    let TopLevelEntity::Global(x) = &module.entities[2] else {
        panic!("expected a global");
    };
    assert!(x.constant);
    assert_eq!(x.attrs.preemption, Some(Preemption::DsoLocal));
    assert_eq!(x.attrs.unnamed_addr, Some(UnnamedAddr::UnnamedAddr));
    assert_eq!(
        x.init.as_ref().map(|(c, _)| c),
        Some(&ParsedConst::CharArray(b"ab\0".to_vec()))
    );
    assert_eq!(x.section, Some(interner.intern(".rodata")));
    assert!(matches!(x.comdat, Some(ComdatRef::Named { name, .. }) if name == interner.intern("c")));
    assert_eq!(x.align, Some(1));

    let TopLevelEntity::Global(c) = &module.entities[3] else {
        panic!("expected a global");
    };
    assert_eq!(c.comdat, Some(ComdatRef::Implicit));
    assert_eq!(c.attrs.linkage, Some(Linkage::LinkonceOdr));

    let TopLevelEntity::Global(ext) = &module.entities[4] else {
        panic!("expected a global");
    };
    assert_eq!(ext.init, None);

    let TopLevelEntity::Global(tls) = &module.entities[5] else {
        panic!("expected a global");
    };
    assert!(tls.attrs.thread_local.is_some());
}

#[test]
fn test_parse_constant_expression_initializer() {
    let (module, _) = parse_source(
        "@s = global [2 x i8] zeroinitializer\n\
         @p = global i8* getelementptr inbounds ([2 x i8], [2 x i8]* @s, i64 0, i64 1)",
    );
    let module = module.unwrap();
    let TopLevelEntity::Global(p) = &module.entities[1] else {
        panic!("expected a global");
    };
    let Some((ParsedConst::Expr(expr), _)) = &p.init else {
        panic!("expected a constant expression");
    };
    let ConstExpr::Gep {
        inbounds, indices, ..
    } = &**expr
    else {
        panic!("expected getelementptr");
    };
    assert!(inbounds);
    assert_eq!(indices.len(), 2);
}

#[test]
fn test_parse_alias() {
    let (module, _) = parse_source("@x = global i32 1\n@a = internal alias i32, i32* @x");
    let module = module.unwrap();
    let TopLevelEntity::IndirectSymbol(alias) = &module.entities[1] else {
        panic!("expected an alias");
    };
    assert_eq!(alias.content_ty, ParsedType::Int(32));
    assert_eq!(alias.target.value, ParsedConst::Global(Ident::Name(alias_target(&module))));
}

fn alias_target(module: &llr_ir::ast::Module) -> llr_ir::Name {
    match &module.entities[0] {
        TopLevelEntity::Global(global) => match global.ident {
            Ident::Name(name) => name,
            Ident::Id(_) => panic!("expected a named global"),
        },
        _ => panic!("expected a global"),
    }
}

#[test]
fn test_parse_function_definition() {
    let (module, interner) = parse_source(
        "define i32 @f(i32 %a, i32 %b) #0 {\n\
         entry:\n\
           %sum = add nsw i32 %a, %b\n\
           %c = icmp sgt i32 %sum, 0\n\
           br i1 %c, label %yes, label %no\n\
         yes:\n\
           ret i32 %sum\n\
         no:\n\
           ret i32 0\n\
         }\n\
         attributes #0 = { nounwind \"frame-pointer\"=\"all\" alignstack=16 }",
    );
    let module = module.unwrap();
    let func = module.functions().next().unwrap();
    assert_eq!(func.header.params.len(), 2);
    assert!(matches!(func.header.fn_attrs[0], FuncAttr::Group { id: 0, .. }));
    assert_eq!(func.blocks.len(), 3);

    let entry = &func.blocks[0];
    assert_eq!(
        entry.label.map(|l| l.ident),
        Some(Ident::Name(interner.intern("entry")))
    );
    assert!(matches!(
        &entry.insts[0].kind,
        InstKind::Binary { op: BinaryOp::Add, flags, .. } if *flags == ArithFlags::NSW
    ));
    assert!(matches!(entry.term.kind, TermKind::CondBr { .. }));
    assert!(matches!(func.blocks[2].term.kind, TermKind::Ret(Some(_))));

    let TopLevelEntity::AttrGroup(group) = &module.entities[1] else {
        panic!("expected an attribute group");
    };
    assert_eq!(group.attrs.len(), 3);
    assert!(matches!(group.attrs[2], FuncAttr::Int { value: 16, .. }));
}

#[test]
fn test_parse_unlabelled_entry_and_numbered_values() {
    let (module, _) = parse_source(
        "define void @g(i32*) {\n\
           %2 = load i32, i32* %0, align 4\n\
           store i32 %2, i32* %0\n\
           br label %3\n\
         3:\n\
           %4 = phi i32 [ %2, %1 ], [ %4, %3 ]\n\
           ret void\n\
         }",
    );
    let module = module.unwrap();
    let func = module.functions().next().unwrap();
    assert_eq!(func.header.params[0].ident, None);
    assert_eq!(func.blocks[0].label, None);
    assert!(matches!(
        func.blocks[0].insts[0].kind,
        InstKind::Load { align: Some(4), .. }
    ));
    assert_eq!(func.blocks[1].label.map(|l| l.ident), Some(Ident::Id(3)));
    let InstKind::Phi { incoming, .. } = &func.blocks[1].insts[0].kind else {
        panic!("expected phi");
    };
    assert_eq!(incoming[1].block.ident, Ident::Id(3));
    assert_eq!(func.blocks[1].term.kind, TermKind::Ret(None));
}

#[test]
fn test_parse_calls() {
    let (module, interner) = parse_source(
        "declare i32 @printf(i8* nocapture readonly, ...)\n\
         define void @h(i8* %s) {\n\
           %r = tail call i32 (i8*, ...) @printf(i8* nonnull %s, i32 1) nounwind\n\
           call void asm sideeffect \"nop\", \"\"()\n\
           call void @llvm.dbg.value(metadata i8* %s, metadata !0)\n\
           ret void\n\
         }\n\
         !0 = !{}",
    );
    let module = module.unwrap();
    let TopLevelEntity::FuncDecl(printf) = &module.entities[0] else {
        panic!("expected a declaration");
    };
    assert!(printf.variadic);
    assert_eq!(printf.params[0].attrs.len(), 2);

    let func = module.functions().next().unwrap();
    let InstKind::Call(call) = &func.blocks[0].insts[0].kind else {
        panic!("expected call");
    };
    assert!(matches!(call.ty, ParsedType::Function { variadic: true, .. }));
    assert_eq!(call.args.len(), 2);
    assert_eq!(
        call.args[0].attrs,
        vec![ParamAttr::Flag(interner.intern("nonnull"))]
    );
    assert!(call.tail.is_some());

    let InstKind::Call(asm) = &func.blocks[0].insts[1].kind else {
        panic!("expected call");
    };
    assert!(matches!(&asm.callee.kind, ValueKind::InlineAsm(a) if a.side_effect && a.asm == b"nop"));

    let InstKind::Call(dbg) = &func.blocks[0].insts[2].kind else {
        panic!("expected call");
    };
    assert!(matches!(
        &dbg.args[0].value.kind,
        ValueKind::Metadata(MdOperand::Value(_))
    ));
    assert!(matches!(
        &dbg.args[1].value.kind,
        ValueKind::Metadata(MdOperand::Ref(r)) if r.id == 0
    ));
}

#[test]
fn test_parse_metadata() {
    let (module, interner) = parse_source(
        "!llvm.module.flags = !{!0, !1}\n\
         !0 = !{i32 7, !\"PIC Level\", i32 2}\n\
         !1 = distinct !{!0, null, !{}}\n\
         define void @m() !dbg !1 {\n\
           ret void, !dbg !0\n\
         }",
    );
    let module = module.unwrap();
    let TopLevelEntity::NamedMetadata(flags) = &module.entities[0] else {
        panic!("expected named metadata");
    };
    assert_eq!(flags.name, interner.intern("llvm.module.flags"));
    assert_eq!(flags.nodes.len(), 2);

    let TopLevelEntity::Metadata(zero) = &module.entities[1] else {
        panic!("expected a metadata node");
    };
    assert!(!zero.distinct);
    let MdNode::Tuple(operands) = &zero.node else {
        panic!("expected a tuple");
    };
    assert_eq!(
        operands[1],
        MdOperand::String(interner.intern("PIC Level"))
    );

    let TopLevelEntity::Metadata(one) = &module.entities[2] else {
        panic!("expected a metadata node");
    };
    assert!(one.distinct);
    let MdNode::Tuple(operands) = &one.node else {
        panic!("expected a tuple");
    };
    assert_eq!(operands[1], MdOperand::Null);
    assert_eq!(operands[2], MdOperand::Tuple(Vec::new()));

    let func = module.functions().next().unwrap();
    assert_eq!(func.header.metadata[0].node.id, 1);
    assert_eq!(func.blocks[0].term.metadata[0].node.id, 0);
}

#[test]
fn test_parse_switch_and_invoke() {
    let (module, _) = parse_source(
        "declare void @may_throw()\n\
         declare i32 @__gxx_personality_v0(...)\n\
         define void @s(i32 %v) personality i32 (...)* @__gxx_personality_v0 {\n\
         entry:\n\
           switch i32 %v, label %done [ i32 0, label %call\n\
                                        i32 1, label %done ]\n\
         call:\n\
           invoke void @may_throw() to label %done unwind label %lpad\n\
         lpad:\n\
           %lp = landingpad { i8*, i32 } cleanup catch i8* null\n\
           resume { i8*, i32 } %lp\n\
         done:\n\
           unreachable\n\
         }",
    );
    let module = module.unwrap();
    let func = module.functions().next().unwrap();
    assert!(func.header.personality.is_some());
    assert!(matches!(&func.blocks[0].term.kind, TermKind::Switch { cases, .. } if cases.len() == 2));
    assert!(matches!(func.blocks[1].term.kind, TermKind::Invoke { .. }));
    assert!(matches!(
        &func.blocks[2].insts[0].kind,
        InstKind::LandingPad { cleanup: true, clauses, .. } if clauses.len() == 1
    ));
    assert!(matches!(func.blocks[3].term.kind, TermKind::Unreachable));
}

#[test]
fn test_parse_specialized_metadata() {
    let (module, interner) = parse_source(
        "!0 = distinct !DISubprogram(name: \"main\", line: -1, flags: DIFlagPrototyped | DIFlagMainSubprogram, isDefinition: true, unit: !1, retainedNodes: !{})\n\
         !1 = !DIExpression(DW_OP_constu, 4, DW_OP_stack_value)\n\
         !2 = !DITemplateValueParameter(type: null, value: i32* @g)",
    );
    let module = module.unwrap();
    let TopLevelEntity::Metadata(program) = &module.entities[0] else {
        panic!("expected a metadata node");
    };
    assert!(program.distinct);
    let MdNode::Specialized(node) = &program.node else {
        panic!("expected a specialized node");
    };
    assert_eq!(node.kind, interner.intern("DISubprogram"));
    let keys: Vec<_> = node.fields.iter().map(|field| field.key).collect();
    assert_eq!(
        keys,
        ["name", "line", "flags", "isDefinition", "unit", "retainedNodes"]
            .map(|key| Some(interner.intern(key)))
    );
    assert_eq!(node.fields[0].value, MdFieldValue::String(interner.intern("main")));
    assert_eq!(node.fields[1].value, MdFieldValue::Int(-1));
    assert_eq!(
        node.fields[2].value,
        MdFieldValue::Words(vec![
            interner.intern("DIFlagPrototyped"),
            interner.intern("DIFlagMainSubprogram"),
        ])
    );
    assert!(matches!(
        node.fields[4].value,
        MdFieldValue::Operand(MdOperand::Ref(r)) if r.id == 1
    ));

    let TopLevelEntity::Metadata(expr) = &module.entities[1] else {
        panic!("expected a metadata node");
    };
    let MdNode::Specialized(expr) = &expr.node else {
        panic!("expected a specialized node");
    };
    assert!(expr.fields.iter().all(|field| field.key.is_none()));
    assert_eq!(expr.fields[1].value, MdFieldValue::Int(4));

    let TopLevelEntity::Metadata(param) = &module.entities[2] else {
        panic!("expected a metadata node");
    };
    let MdNode::Specialized(param) = &param.node else {
        panic!("expected a specialized node");
    };
    assert_eq!(param.fields[0].value, MdFieldValue::Operand(MdOperand::Null));
    assert!(matches!(
        &param.fields[1].value,
        MdFieldValue::Operand(MdOperand::Value(value))
            if matches!(value.value.kind, ValueKind::Const(ParsedConst::Global(_)))
    ));
}

#[test]
fn test_parse_inline_specialized_operand() {
    let (module, _) = parse_source(
        "define void @f(i32 %x) {\n\
           call void @llvm.dbg.value(metadata i32 %x, metadata !0, metadata !DIExpression()), !dbg !1\n\
           ret void\n\
         }",
    );
    let module = module.unwrap();
    let func = module.functions().next().unwrap();
    let inst = &func.blocks[0].insts[0];
    let InstKind::Call(call) = &inst.kind else {
        panic!("expected a call");
    };
    assert!(matches!(
        &call.args[2].value.kind,
        ValueKind::Metadata(MdOperand::Specialized(node)) if node.fields.is_empty()
    ));
    assert_eq!(inst.metadata.len(), 1);
}

#[test]
fn test_parse_use_list_orders() {
    let (module, interner) = parse_source(
        "uselistorder i32* @g, { 1, 0, 2 }\n\
         uselistorder_bb @f, %bb, { 1, 0 }",
    );
    let module = module.unwrap();
    let TopLevelEntity::UseListOrder(order) = &module.entities[0] else {
        panic!("expected a use-list order");
    };
    assert_eq!(order.indices, [1, 0, 2]);
    let TopLevelEntity::UseListOrderBb(order) = &module.entities[1] else {
        panic!("expected a block use-list order");
    };
    assert_eq!(order.func, Ident::Name(interner.intern("f")));
    assert_eq!(order.block.ident, Ident::Name(interner.intern("bb")));
    assert_eq!(order.indices, [1, 0]);
}

#[test]
fn test_parse_exception_pads_and_callbr() {
    let (module, _) = parse_source(
        "define void @w(i32 %x) personality i32 (...)* @__CxxFrameHandler3 {\n\
         dispatch:\n\
           %cs = catchswitch within none [label %h1, label %h2] unwind label %clean\n\
         h1:\n\
           %p = catchpad within %cs [i8* null, i32 64]\n\
           catchret from %p to label %done\n\
         h2:\n\
           callbr void asm \"\", \"r,!i\"(i32 %x) to label %done [label %h1]\n\
         clean:\n\
           %c = cleanuppad within none []\n\
           cleanupret from %c unwind to caller\n\
         done:\n\
           ret void\n\
         }",
    );
    let module = module.unwrap();
    let func = module.functions().next().unwrap();
    assert!(matches!(
        &func.blocks[0].term.kind,
        TermKind::CatchSwitch { handlers, unwind: Some(_), .. } if handlers.len() == 2
    ));
    assert!(func.blocks[0].term.result.is_some());
    assert!(matches!(
        &func.blocks[1].insts[0].kind,
        InstKind::CatchPad { args, .. } if args.len() == 2
    ));
    assert!(matches!(func.blocks[1].term.kind, TermKind::CatchRet { .. }));
    assert!(matches!(
        &func.blocks[2].term.kind,
        TermKind::CallBr { indirect, .. } if indirect.len() == 1
    ));
    assert!(matches!(
        &func.blocks[3].insts[0].kind,
        InstKind::CleanupPad { args, .. } if args.is_empty()
    ));
    assert!(matches!(
        func.blocks[3].term.kind,
        TermKind::CleanupRet { unwind: None, .. }
    ));
}

#[test]
fn test_parse_memory_and_aggregate_ops() {
    let (module, _) = parse_source(
        "define void @mem({ i32, i32 } %agg) {\n\
           %p = alloca i32, i32 4, align 16\n\
           %q = getelementptr inbounds i32, i32* %p, i64 1\n\
           %old = atomicrmw add i32* %q, i32 1 seq_cst\n\
           %pair = cmpxchg i32* %q, i32 0, i32 1 acq_rel monotonic\n\
           fence release\n\
           %e = extractvalue { i32, i32 } %agg, 1\n\
           %f = fadd fast float 1.0, 2.0\n\
           %b = bitcast i32* %p to i8*\n\
           %v = load atomic volatile i32, i32* %p acquire, align 4\n\
           ret void\n\
         }",
    );
    let module = module.unwrap();
    let insts = &module.functions().next().unwrap().blocks[0].insts;
    assert!(matches!(
        &insts[0].kind,
        InstKind::Alloca { count: Some(_), align: Some(16), .. }
    ));
    assert!(matches!(&insts[1].kind, InstKind::Gep { inbounds: true, indices, .. } if indices.len() == 1));
    assert!(matches!(insts[2].kind, InstKind::AtomicRmw { .. }));
    assert!(matches!(insts[3].kind, InstKind::CmpXchg { .. }));
    assert!(insts[4].result.is_none());
    assert!(matches!(&insts[5].kind, InstKind::ExtractValue { indices, .. } if *indices == [1]));
    assert!(matches!(&insts[6].kind, InstKind::Binary { fmf, .. } if fmf.is_all()));
    assert!(matches!(insts[7].kind, InstKind::Cast { .. }));
    assert!(matches!(
        insts[8].kind,
        InstKind::Load { volatile: true, ordering: Some(_), align: Some(4), .. }
    ));
}
