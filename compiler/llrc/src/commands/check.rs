//! The `check` and `print` commands.

use super::resolve_file;
use crate::cli::CommandArgs;

/// Resolve a file and report the first error, if any.
pub fn check_file(path: &str, args: &CommandArgs) {
    let (module, _) = resolve_file(path, args);
    println!(
        "OK: {path} ({} types, {} globals, {} functions)",
        module.type_defs.len(),
        module.globals.len(),
        module.functions.len()
    );
}

/// Resolve a file and print it back in canonical form, to stdout or `-o`.
pub fn print_file(path: &str, args: &CommandArgs) {
    let (module, interner) = resolve_file(path, args);
    let text = module.to_text(&interner);
    match &args.output {
        Some(out) => {
            if let Err(e) = std::fs::write(out, text) {
                eprintln!("error writing '{}': {e}", out.display());
                std::process::exit(1);
            }
        }
        None => print!("{text}"),
    }
}
