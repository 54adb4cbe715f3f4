#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::path::PathBuf;

use llr_diagnostic::emitter::ColorMode;
use pretty_assertions::assert_eq;

use super::CommandArgs;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_path_only() {
    let parsed = CommandArgs::parse(&args(&["in.ll"])).unwrap();
    assert_eq!(
        parsed,
        CommandArgs {
            path: Some("in.ll".to_string()),
            ..CommandArgs::default()
        }
    );
    assert!(!parsed.resolve_options().parallel);
}

#[test]
fn test_flags_in_any_position() {
    let parsed =
        CommandArgs::parse(&args(&["--parallel", "in.ll", "-o", "out.ll", "--color=never"]))
            .unwrap();
    assert_eq!(parsed.path.as_deref(), Some("in.ll"));
    assert_eq!(parsed.output, Some(PathBuf::from("out.ll")));
    assert_eq!(parsed.color, ColorMode::Never);
    assert!(parsed.resolve_options().parallel);
}

#[test]
fn test_rejected_arguments() {
    for bad in [
        &["in.ll", "-o"][..],
        &["--color=sometimes", "in.ll"][..],
        &["--fast", "in.ll"][..],
        &["a.ll", "b.ll"][..],
    ] {
        assert!(CommandArgs::parse(&args(bad)).is_err(), "{bad:?}");
    }
}

#[test]
fn test_missing_path_is_not_a_parse_error() {
    let parsed = CommandArgs::parse(&args(&["--parallel"])).unwrap();
    assert_eq!(parsed.path, None);
}
