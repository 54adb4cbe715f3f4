use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
    lex(source, interner).iter().map(|t| t.kind.clone()).collect()
}

#[test]
fn test_lex_instruction() {
    let interner = StringInterner::new();
    let tokens = kinds("%sum = add nsw i32 %a, 7 ; trailing comment", &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::LocalName(interner.intern("sum")),
            TokenKind::Eq,
            TokenKind::Word(interner.intern("add")),
            TokenKind::Word(interner.intern("nsw")),
            TokenKind::Word(interner.intern("i32")),
            TokenKind::LocalName(interner.intern("a")),
            TokenKind::Comma,
            TokenKind::Int(7),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_sigils() {
    let interner = StringInterner::new();
    let tokens = kinds("%3 @0 @main $cd !dbg !12 #4 %struct.node", &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::LocalId(3),
            TokenKind::GlobalId(0),
            TokenKind::GlobalName(interner.intern("main")),
            TokenKind::ComdatName(interner.intern("cd")),
            TokenKind::MetadataName(interner.intern("dbg")),
            TokenKind::MetadataId(12),
            TokenKind::AttrGroupId(4),
            TokenKind::LocalName(interner.intern("struct.node")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_quoted_names_decode_escapes() {
    let interner = StringInterner::new();
    let tokens = kinds(r#"@"hello world" %"a\22b" "odd label":"#, &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::GlobalName(interner.intern("hello world")),
            TokenKind::LocalName(interner.intern("a\"b")),
            TokenKind::LabelName(interner.intern("odd label")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_labels() {
    let interner = StringInterner::new();
    let tokens = kinds("entry:\n  br label %2\n2:", &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::LabelName(interner.intern("entry")),
            TokenKind::Word(interner.intern("br")),
            TokenKind::Word(interner.intern("label")),
            TokenKind::LocalId(2),
            TokenKind::LabelId(2),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_literals() {
    let interner = StringInterner::new();
    let tokens = kinds(
        r#"-42 1.5e+00 0x3FB999999999999A 0xK4000C000000000000000 "dl" c"hi\0A""#,
        &interner,
    );
    assert_eq!(
        tokens,
        vec![
            TokenKind::Int(-42),
            TokenKind::Float(1.5f64.to_bits()),
            TokenKind::HexFloat(interner.intern("0x3FB999999999999A")),
            TokenKind::HexFloat(interner.intern("0xK4000C000000000000000")),
            TokenKind::String(interner.intern("dl")),
            TokenKind::CharArray(interner.intern("hi\\0A")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_punctuation() {
    let interner = StringInterner::new();
    let tokens = kinds("i32 (i8*, ...) <{ }> !{ } [ ]", &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::Word(interner.intern("i32")),
            TokenKind::LParen,
            TokenKind::Word(interner.intern("i8")),
            TokenKind::Star,
            TokenKind::Comma,
            TokenKind::Ellipsis,
            TokenKind::RParen,
            TokenKind::Less,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Greater,
            TokenKind::Exclaim,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_specialized_metadata() {
    let interner = StringInterner::new();
    let tokens = kinds("!DILocation(line: 3, flags: DIFlagA | DIFlagB)", &interner);
    assert_eq!(
        tokens,
        vec![
            TokenKind::MetadataName(interner.intern("DILocation")),
            TokenKind::LParen,
            TokenKind::LabelName(interner.intern("line")),
            TokenKind::Int(3),
            TokenKind::Comma,
            TokenKind::LabelName(interner.intern("flags")),
            TokenKind::Word(interner.intern("DIFlagA")),
            TokenKind::Pipe,
            TokenKind::Word(interner.intern("DIFlagB")),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_errors_and_eof_span() {
    let interner = StringInterner::new();
    let tokens = lex("ret ^ %\"bad\\zz\"", &interner);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].span, Span::new(4, 5));
    assert_eq!(tokens[2].kind, TokenKind::Error);
    let eof = &tokens[tokens.len() - 1];
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span, Span::point(15));
}
