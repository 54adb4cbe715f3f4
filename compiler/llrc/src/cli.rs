//! Command line flags shared by every subcommand.

use std::path::PathBuf;

use llr_diagnostic::emitter::ColorMode;
use llr_resolve::ResolveOptions;

/// Parsed flags and the input path of one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandArgs {
    pub path: Option<String>,
    pub parallel: bool,
    pub output: Option<PathBuf>,
    pub color: ColorMode,
}

impl CommandArgs {
    /// Parse everything after the command name.
    ///
    /// Flags may appear before or after the path. Only the first positional
    /// argument is taken as the path; a second one is an error.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = CommandArgs::default();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if arg == "-o" {
                let Some(out) = args.get(i + 1) else {
                    return Err("`-o` needs an output path".to_string());
                };
                parsed.output = Some(PathBuf::from(out));
                i += 2;
                continue;
            }
            if arg == "--parallel" {
                parsed.parallel = true;
            } else if let Some(value) = arg.strip_prefix("--color=") {
                parsed.color = ColorMode::from_flag(value).ok_or_else(|| {
                    format!("invalid color mode '{value}' (expected auto, always or never)")
                })?;
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if parsed.path.is_none() {
                parsed.path = Some(arg.to_string());
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
            i += 1;
        }
        Ok(parsed)
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        if self.parallel {
            ResolveOptions::parallel()
        } else {
            ResolveOptions::sequential()
        }
    }
}

#[cfg(test)]
mod tests;
