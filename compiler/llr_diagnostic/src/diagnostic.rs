use std::fmt;

use llr_ir::Span;

use crate::ErrorCode;

/// A span with the text printed next to it.
///
/// The primary label marks the offending token; secondary labels point at
/// related definitions, such as the first of two duplicates.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

/// One error, ready for an emitter.
///
/// Parsing and resolution both stop at the first error, so a run produces
/// at most one of these.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Label the offending span.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message.into(), true)
    }

    /// Label a related span.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message.into(), false)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn push_label(mut self, span: Span, message: String, is_primary: bool) -> Self {
        self.labels.push(Label {
            span,
            message,
            is_primary,
        });
        self
    }

    /// `internal error` for resolver defects, `error` otherwise.
    pub fn heading(&self) -> &'static str {
        if self.code.is_internal() {
            "internal error"
        } else {
            "error"
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.heading(), self.code, self.message)?;
        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labels_keep_insertion_order() {
        let diag = Diagnostic::error(ErrorCode::E2001)
            .with_message("global `@foo` is defined more than once")
            .with_label(Span::new(20, 24), "redefined here")
            .with_secondary_label(Span::new(0, 4), "first defined here")
            .with_note("globals, aliases, ifuncs and functions share one namespace");

        let primary: Vec<bool> = diag.labels.iter().map(|l| l.is_primary).collect();
        assert_eq!(primary, [true, false]);
        assert_eq!(diag.labels[1].span, Span::new(0, 4));
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error(ErrorCode::E2002)
            .with_message("use of undefined local value `%x` in `@f`")
            .with_label(Span::new(3, 5), "not defined in this function");
        assert_eq!(
            diag.to_string(),
            "error[E2002]: use of undefined local value `%x` in `@f`\n  --> 3..5: not defined in this function"
        );
    }

    #[test]
    fn test_internal_heading() {
        let diag = Diagnostic::error(ErrorCode::E9001).with_message("block without a skeleton");
        assert_eq!(diag.heading(), "internal error");
        assert_eq!(
            diag.to_string(),
            "internal error[E9001]: block without a skeleton"
        );
    }
}
