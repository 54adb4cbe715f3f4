use llr_ir::{BinaryOp, ComdatKind, FastMathFlags, Ident, Linkage, StringInterner, SymbolAttrs};
use pretty_assertions::assert_eq;

use super::format_double;
use crate::{
    BasicBlock, Comdat, ComdatId, ConstExpr, Constant, Function, FunctionBody, Global,
    GlobalId, GlobalKind, InstId, InstKind, Instruction, LocalIdent, LocalRef, Module,
    NamedBody, Param, TermKind, Terminator, Type, TypeId, Value, Variable,
};

fn variable(ident: Ident, ty: TypeId, content_ty: TypeId, init: Option<Constant>) -> Global {
    Global {
        ident,
        ty,
        attrs: SymbolAttrs::default(),
        metadata: Vec::new(),
        kind: GlobalKind::Variable(Variable {
            content_ty,
            constant: false,
            externally_initialized: false,
            init,
            section: None,
            comdat: None,
            align: None,
        }),
    }
}

#[test]
fn test_format_double() {
    assert_eq!(format_double(1.0f64.to_bits()), "1.000000e+00");
    assert_eq!(format_double((-2.5f64).to_bits()), "-2.500000e+00");
    assert_eq!(format_double(0.0f64.to_bits()), "0.000000e+00");
    assert_eq!(format_double(1e100f64.to_bits()), "1.000000e+100");
    assert_eq!(format_double(0.125f64.to_bits()), "1.250000e-01");
    assert_eq!(format_double(0.1f64.to_bits()), "1.000000e-01");
    assert_eq!(format_double((1.0f64 / 3.0).to_bits()), "0x3FD5555555555555");
    assert_eq!(format_double(f64::NAN.to_bits()), "0x7FF8000000000000");
}

#[test]
fn test_type_definitions() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let types = &module.types;
    let node = types.intern(Type::Named(Ident::Name(interner.intern("node"))));
    let body = types.intern(Type::Struct {
        fields: vec![TypeId::I32, types.pointer_to(node, 0)],
        packed: false,
    });
    types.set_named_body(node, NamedBody::Type(body));
    let handle = types.intern(Type::Named(Ident::Name(interner.intern("opaque handle"))));
    types.set_named_body(handle, NamedBody::Opaque);
    let numbered = types.intern(Type::Named(Ident::Id(0)));
    let packed = types.intern(Type::Struct {
        fields: vec![TypeId::I8],
        packed: true,
    });
    let vector = types.intern(Type::Vector {
        len: 4,
        elem: TypeId::I32,
        scalable: true,
    });
    let func = types.intern(Type::Function {
        ret: TypeId::VOID,
        params: vec![],
        variadic: true,
    });
    let array = types.intern(Type::Array { len: 2, elem: packed });
    let fields = vec![vector, types.pointer_to(func, 3), array];
    let tuple = types.intern(Type::Struct {
        fields,
        packed: false,
    });
    types.set_named_body(numbered, NamedBody::Type(tuple));
    module.type_defs = vec![node, handle, numbered];

    assert_eq!(
        module.to_text(&interner),
        "%node = type { i32, %node* }\n\
         %\"opaque handle\" = type opaque\n\
         %0 = type { <vscale x 4 x i32>, void (...) addrspace(3)*, [2 x <{ i8 }>] }\n"
    );
}

#[test]
fn test_globals_and_comdats() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let name = interner.intern("self");
    let ptr_i8 = module.types.pointer_to(TypeId::I8, 0);
    let ptr_ptr = module.types.pointer_to(ptr_i8, 0);
    module.comdats.push(Comdat {
        name,
        kind: ComdatKind::Any,
    });

    // @self = global i8* bitcast (i8** @self to i8*), comdat
    let init = Constant::Expr {
        ty: ptr_i8,
        expr: Box::new(ConstExpr::Cast {
            op: llr_ir::CastOp::BitCast,
            value: Constant::Global {
                ty: ptr_ptr,
                id: GlobalId::new(0),
            },
        }),
    };
    let mut this = variable(Ident::Name(name), ptr_ptr, ptr_i8, Some(init));
    if let GlobalKind::Variable(var) = &mut this.kind {
        var.comdat = Some(ComdatId::new(0));
        var.align = Some(8);
    }
    module.globals.push(this);

    let mut external = variable(
        Ident::Name(interner.intern("ext")),
        module.types.pointer_to(TypeId::I1, 0),
        TypeId::I1,
        None,
    );
    external.attrs.linkage = Some(Linkage::External);
    module.globals.push(external);

    let array = module.types.intern(Type::Array {
        len: 3,
        elem: TypeId::I8,
    });
    let text = variable(
        Ident::Id(0),
        module.types.pointer_to(array, 0),
        array,
        Some(Constant::CharArray {
            ty: array,
            bytes: b"a\"\0".to_vec(),
        }),
    );
    module.globals.push(text);
    module.variables = vec![GlobalId::new(0), GlobalId::new(1), GlobalId::new(2)];

    assert_eq!(
        module.to_text(&interner),
        "$self = comdat any\n\
         \n\
         @self = global i8* bitcast (i8** @self to i8*), comdat, align 8\n\
         @ext = external global i1\n\
         @0 = global [3 x i8] c\"a\\22\\00\"\n"
    );
}

#[test]
fn test_function_body() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let sig = module.types.intern(Type::Function {
        ret: TypeId::I32,
        params: vec![TypeId::I32],
        variadic: false,
    });
    let a = Value::Local {
        local: LocalRef::Param(0),
        ty: TypeId::I32,
    };
    let sum = Instruction {
        ident: LocalIdent::Id(0),
        ty: TypeId::I32,
        kind: InstKind::Binary {
            op: BinaryOp::Add,
            flags: llr_ir::ArithFlags::NSW,
            fmf: FastMathFlags::empty(),
            lhs: a,
            rhs: Value::Const(Constant::Int {
                ty: TypeId::I32,
                value: 1,
            }),
        },
        metadata: Vec::new(),
    };
    let body = FunctionBody {
        blocks: vec![BasicBlock {
            ident: LocalIdent::Named(interner.intern("entry")),
            insts: vec![InstId::new(0)],
            term: Terminator {
                ident: LocalIdent::Unnamed,
                ty: TypeId::VOID,
                kind: TermKind::Ret(Some(Value::Local {
                    local: LocalRef::Inst(InstId::new(0)),
                    ty: TypeId::I32,
                })),
                metadata: Vec::new(),
            },
        }],
        insts: vec![sum],
    };
    let func = Function {
        sig,
        cconv: None,
        ret_attrs: Vec::new(),
        params: vec![Param {
            ty: TypeId::I32,
            attrs: Vec::new(),
            ident: LocalIdent::Named(interner.intern("a")),
        }],
        fn_attrs: Vec::new(),
        section: None,
        comdat: None,
        align: None,
        gc: None,
        prefix: None,
        prologue: None,
        personality: None,
        body: Some(body),
    };
    let attrs = SymbolAttrs {
        linkage: Some(Linkage::Internal),
        ..SymbolAttrs::default()
    };
    module.globals.push(Global {
        ident: Ident::Name(interner.intern("inc")),
        ty: module.types.pointer_to(sig, 0),
        attrs,
        metadata: Vec::new(),
        kind: GlobalKind::Function(Box::new(func)),
    });
    module.functions.push(GlobalId::new(0));

    assert_eq!(
        module.to_text(&interner),
        "define internal i32 @inc(i32 %a) {\n\
         entry:\n\
         \x20 %0 = add nsw i32 %a, 1\n\
         \x20 ret i32 %0\n\
         }\n"
    );
}

#[test]
fn test_i1_and_aggregate_constants() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let pair = module.types.intern(Type::Struct {
        fields: vec![TypeId::I1, TypeId::I32],
        packed: false,
    });
    let init = Constant::Struct {
        ty: pair,
        fields: vec![
            Constant::Int {
                ty: TypeId::I1,
                value: 1,
            },
            Constant::Undef(TypeId::I32),
        ],
    };
    module.globals.push(variable(
        Ident::Name(interner.intern("p")),
        module.types.pointer_to(pair, 0),
        pair,
        Some(init),
    ));
    module.variables.push(GlobalId::new(0));

    assert_eq!(
        module.to_text(&interner),
        "@p = global { i1, i32 } { i1 true, i32 undef }\n"
    );
}
