use super::*;
use crate::{Ident, StringInterner};
use pretty_assertions::assert_eq;

fn header(interner: &StringInterner, name: &str) -> FuncHeader {
    FuncHeader {
        ident: Ident::Name(interner.intern(name)),
        span: Span::new(0, 4),
        attrs: crate::SymbolAttrs::default(),
        cconv: None,
        ret_attrs: Vec::new(),
        ret_ty: ParsedType::Int(32),
        params: vec![ParsedParam {
            ty: ParsedType::pointer_to(ParsedType::Int(8)),
            attrs: Vec::new(),
            ident: None,
        }],
        variadic: true,
        fn_attrs: Vec::new(),
        section: None,
        comdat: None,
        align: None,
        gc: None,
        prefix: None,
        prologue: None,
        personality: None,
        metadata: Vec::new(),
    }
}

#[test]
fn test_signature_from_header() {
    let interner = StringInterner::new();
    let sig = header(&interner, "printf").signature();
    assert_eq!(
        sig,
        ParsedType::Function {
            ret: Box::new(ParsedType::Int(32)),
            params: vec![ParsedType::pointer_to(ParsedType::Int(8))],
            variadic: true,
        }
    );
}

#[test]
fn test_functions_skips_declarations() {
    let interner = StringInterner::new();
    let module = Module {
        entities: vec![
            TopLevelEntity::FuncDecl(header(&interner, "printf")),
            TopLevelEntity::SourceFilename(interner.intern("a.c")),
            TopLevelEntity::FuncDef(FuncDef {
                header: header(&interner, "main"),
                blocks: Vec::new(),
            }),
        ],
    };
    let names: Vec<_> = module.functions().map(|f| f.header.ident).collect();
    assert_eq!(names, vec![Ident::Name(interner.intern("main"))]);
    assert_eq!(module.entities[1].span(), None);
}
