//! Parse errors and the context they were raised in.

use llr_diagnostic::{Diagnostic, ErrorCode};
use llr_ir::Span;

/// What the parser was working on when an error occurred.
///
/// Recorded once, by the innermost `in_error_context` call that sees the
/// error, and rendered as "while parsing ..." on the diagnostic label.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorContext {
    Module,
    TypeDef,
    ComdatDef,
    GlobalVariable,
    IndirectSymbol,
    FunctionHeader,
    FunctionBody,
    Instruction,
    Terminator,
    Constant,
    Type,
    AttrGroup,
    Metadata,
    UseListOrder,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::Module => "a module",
            ErrorContext::TypeDef => "a type definition",
            ErrorContext::ComdatDef => "a comdat definition",
            ErrorContext::GlobalVariable => "a global variable",
            ErrorContext::IndirectSymbol => "an alias or ifunc",
            ErrorContext::FunctionHeader => "a function header",
            ErrorContext::FunctionBody => "a function body",
            ErrorContext::Instruction => "an instruction",
            ErrorContext::Terminator => "a terminator",
            ErrorContext::Constant => "a constant",
            ErrorContext::Type => "a type",
            ErrorContext::AttrGroup => "an attribute group",
            ErrorContext::Metadata => "metadata",
            ErrorContext::UseListOrder => "a use-list order",
        }
    }
}

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Attach a context unless a more specific one is already set.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.context {
            Some(context) => format!("while parsing {}", context.description()),
            None => "here".to_string(),
        };
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, label)
    }
}
