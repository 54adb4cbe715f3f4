#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::ErrorCode;
use llr_ir::Span;
use pretty_assertions::assert_eq;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message("duplicate global `@foo`")
        .with_label(Span::new(46, 50), "redefined here")
        .with_secondary_label(Span::new(12, 16), "first defined here")
        .with_note("globals and functions share one namespace")
}

const SOURCE: &str = "define void @foo() {\n  ret void\n}\ndefine void @foo() {\n";

#[test]
fn test_terminal_emitter_no_color() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

    emitter.emit(&sample_diagnostic());
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("error[E2001]: duplicate global `@foo`\n"));
    assert!(text.contains("  --> 46..50: redefined here"));
    assert!(text.contains("      12..16: first defined here"));
    assert!(text.contains("= note: globals and functions"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_terminal_emitter_with_color() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false);

    emitter.emit(&sample_diagnostic());
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("\x1b["));
    assert!(text.contains("E2001"));
}

#[test]
fn test_source_positions() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
        .with_source("dup.ll", SOURCE);

    emitter.emit(&sample_diagnostic());
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("  --> dup.ll:4:13: redefined here"));
    assert!(text.contains("      dup.ll:1:13: first defined here"));
}

#[test]
fn test_summary() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    emitter.emit_summary(2);
    emitter.emit_summary(1);
    emitter.emit_summary(0);
    let text = String::from_utf8(output).unwrap();
    assert_eq!(
        text,
        "error: aborting due to 2 previous errors\nerror: aborting due to previous error\n"
    );
}

#[test]
fn test_internal_error_heading() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    emitter.emit(&Diagnostic::error(ErrorCode::E9001).with_message("block without a skeleton"));
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("internal error[E9001]: block without a skeleton\n"));
}

#[test]
fn test_color_mode() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
}
