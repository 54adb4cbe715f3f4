//! Malformed input: codes, spans and contexts.

use super::parse_source;
use crate::ErrorContext;
use llr_diagnostic::ErrorCode;
use llr_ir::Span;
use pretty_assertions::assert_eq;

fn parse_err(source: &str) -> crate::ParseError {
    match parse_source(source).0 {
        Ok(module) => panic!("expected a parse error, got {module:?}"),
        Err(err) => err,
    }
}

#[test]
fn test_missing_equals() {
    let err = parse_err("@x global i32 0");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `=`, found `global`");
    assert_eq!(err.span, Span::new(3, 9));
}

#[test]
fn test_unknown_instruction_reports_context() {
    let err = parse_err("define void @f() {\n  %x = frobnicate i32 1\n  ret void\n}");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.context, Some(ErrorContext::Instruction));
    assert_eq!(
        err.to_diagnostic().labels[0].message,
        "while parsing an instruction"
    );
}

#[test]
fn test_missing_terminator() {
    let err = parse_err("define void @f() {\n  %x = add i32 1, 2\n}");
    assert_eq!(err.message, "expected an instruction, found `}`");
    assert_eq!(err.context, Some(ErrorContext::FunctionBody));
}

#[test]
fn test_expected_type() {
    let err = parse_err("@x = global ptr null");
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.context, Some(ErrorContext::Type));
}

#[test]
fn test_expected_value() {
    let err = parse_err("define void @f() {\n  ret i32 ]\n}");
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.context, Some(ErrorContext::Constant));
}

#[test]
fn test_integer_out_of_range() {
    let err = parse_err("%t = type [4294967296 x <4294967296 x i8>]");
    assert_eq!(err.code, ErrorCode::E1004);
}

#[test]
fn test_landing_pad_without_clauses() {
    let source = "define void @f() {\n  %l = landingpad { i8*, i32 }\n  ret void\n}";
    let err = parse_err(source);
    assert_eq!(err.code, ErrorCode::E1005);
    assert_eq!(err.context, Some(ErrorContext::Instruction));
    assert_eq!(err.span, Span::new(26, 49));
}

#[test]
fn test_invalid_token() {
    let err = parse_err("@x = global i32 ^");
    assert_eq!(err.code, ErrorCode::E0001);
    assert_eq!(err.span, Span::new(16, 17));
}

#[test]
fn test_invalid_char_array_escape() {
    let err = parse_err(r#"@s = constant [2 x i8] c"\zz""#);
    assert_eq!(err.code, ErrorCode::E0002);
}

#[test]
fn test_terminator_cannot_have_result() {
    let err = parse_err("define void @f() {\n  %x = br label %x\n}");
    assert_eq!(err.message, "`br` does not produce a value");
}

#[test]
fn test_specialized_flags_must_be_words() {
    let err = parse_err("!0 = !DIBasicType(flags: DIFlagPublic | 3)");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.context, Some(ErrorContext::Metadata));
    assert_eq!(err.span, Span::new(40, 41));
}

#[test]
fn test_use_list_order_needs_indices() {
    let err = parse_err("uselistorder i32* @g, { }");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.context, Some(ErrorContext::UseListOrder));
}

#[test]
fn test_catchswitch_needs_a_handler() {
    let err = parse_err(
        "define void @f() {\n  %cs = catchswitch within none [] unwind to caller\n}",
    );
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.context, Some(ErrorContext::Terminator));
}

#[test]
fn test_catchret_has_no_result() {
    let err = parse_err(
        "define void @f() {\n  %r = catchret from %p to label %done\n}",
    );
    assert_eq!(err.message, "`catchret` does not produce a value");
}
