//! Diagnostic Emitters
//!
//! Each emitter implements the `DiagnosticEmitter` trait. Only the
//! terminal emitter exists today.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit the closing `aborting due to ...` line.
    fn emit_summary(&mut self, error_count: usize);
}
