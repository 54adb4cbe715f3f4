//! Resolution errors.
//!
//! Resolution stops at the first error; every variant carries the span of
//! the offending node and converts to a [`Diagnostic`] with
//! [`ResolveError::into_diagnostic`].

use llr_diagnostic::{Diagnostic, ErrorCode};
use llr_ir::{Ident, Span, StringInterner};

/// Identifier namespace an error occurred in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Scope {
    Type,
    Global,
    Comdat,
    AttrGroup,
    Metadata,
    /// Locals of the function `@function`.
    Local { function: Ident },
}

impl Scope {
    fn sigil(self) -> char {
        match self {
            Scope::Type | Scope::Local { .. } => '%',
            Scope::Global => '@',
            Scope::Comdat => '$',
            Scope::AttrGroup => '#',
            Scope::Metadata => '!',
        }
    }

    /// `` `@x` ``, `` `%bb` in `@f` ``.
    fn render(self, ident: Ident, interner: &StringInterner) -> String {
        let text = ident.to_text(self.sigil(), interner);
        match self {
            Scope::Local { function } => {
                format!("`{text}` in `{}`", function.to_text('@', interner))
            }
            _ => format!("`{text}`"),
        }
    }

    fn container(self) -> &'static str {
        match self {
            Scope::Local { .. } => "not defined in this function",
            _ => "not defined in this module",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Scope::Type => "type",
            Scope::Global => "global",
            Scope::Comdat => "comdat",
            Scope::AttrGroup => "attribute group",
            Scope::Metadata => "metadata node",
            Scope::Local { .. } => "local value",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("{} defined more than once", scope.noun())]
    DuplicateIdentifier {
        scope: Scope,
        ident: Ident,
        first: Span,
        second: Span,
    },

    #[error("use of undefined {}", scope.noun())]
    UnresolvedIdentifier {
        scope: Scope,
        ident: Ident,
        span: Span,
    },

    #[error("named type has no body")]
    UnresolvedType { ident: Ident, span: Span },

    #[error("named type refers to itself")]
    SelfReferentialType { names: Vec<Ident>, span: Span },

    #[error("local value numbered out of sequence: expected %{expected}, found %{found}")]
    UnexpectedLocalId {
        function: Ident,
        expected: u32,
        found: u32,
        span: Span,
    },

    #[error("void value cannot be named")]
    NamedVoidValue {
        function: Ident,
        ident: Ident,
        span: Span,
    },

    #[error("expected {expected}, found `{found}`")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("invalid constant: {message}")]
    InvalidConstant { message: String, span: Span },

    #[error("internal error: {message}")]
    MalformedSkeleton { message: String, span: Span },
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::DuplicateIdentifier { .. } => ErrorCode::E2001,
            ResolveError::UnresolvedIdentifier { .. } => ErrorCode::E2002,
            ResolveError::UnresolvedType { .. } => ErrorCode::E2003,
            ResolveError::SelfReferentialType { .. } => ErrorCode::E2004,
            ResolveError::UnexpectedLocalId { .. } => ErrorCode::E2005,
            ResolveError::NamedVoidValue { .. } => ErrorCode::E2006,
            ResolveError::TypeMismatch { .. } => ErrorCode::E2007,
            ResolveError::InvalidConstant { .. } => ErrorCode::E2008,
            ResolveError::MalformedSkeleton { .. } => ErrorCode::E9001,
        }
    }

    /// Span of the offending node.
    pub fn span(&self) -> Span {
        match self {
            ResolveError::DuplicateIdentifier { second: span, .. }
            | ResolveError::UnresolvedIdentifier { span, .. }
            | ResolveError::UnresolvedType { span, .. }
            | ResolveError::SelfReferentialType { span, .. }
            | ResolveError::UnexpectedLocalId { span, .. }
            | ResolveError::NamedVoidValue { span, .. }
            | ResolveError::TypeMismatch { span, .. }
            | ResolveError::InvalidConstant { span, .. }
            | ResolveError::MalformedSkeleton { span, .. } => *span,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, span: Span) -> Self {
        ResolveError::MalformedSkeleton {
            message: message.into(),
            span,
        }
    }

    pub(crate) fn invalid_constant(message: impl Into<String>, span: Span) -> Self {
        ResolveError::InvalidConstant {
            message: message.into(),
            span,
        }
    }

    /// Convert to a diagnostic, rendering identifiers with `interner`.
    pub fn into_diagnostic(self, interner: &StringInterner) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code());
        match self {
            ResolveError::DuplicateIdentifier {
                scope,
                ident,
                first,
                second,
            } => diagnostic
                .with_message(format!(
                    "{} {} is defined more than once",
                    scope.noun(),
                    scope.render(ident, interner)
                ))
                .with_label(second, "redefined here")
                .with_secondary_label(first, "first defined here"),
            ResolveError::UnresolvedIdentifier { scope, ident, span } => diagnostic
                .with_message(format!(
                    "use of undefined {} {}",
                    scope.noun(),
                    scope.render(ident, interner)
                ))
                .with_label(span, scope.container()),
            ResolveError::UnresolvedType { ident, span } => diagnostic
                .with_message(format!(
                    "named type `{}` never receives a body",
                    ident.to_text('%', interner)
                ))
                .with_label(span, "declared here"),
            ResolveError::SelfReferentialType { names, span } => {
                let cycle: Vec<String> = names
                    .iter()
                    .map(|name| name.to_text('%', interner))
                    .collect();
                diagnostic
                    .with_message(format!(
                        "named type refers to itself: {}",
                        cycle.join(" -> ")
                    ))
                    .with_label(span, "cycle starts here")
                    .with_note("recursion must go through a pointer or an aggregate")
            }
            ResolveError::UnexpectedLocalId {
                function,
                expected,
                found,
                span,
            } => diagnostic
                .with_message(format!(
                    "local value numbered out of sequence in `{}`",
                    function.to_text('@', interner)
                ))
                .with_label(span, format!("expected %{expected}, found %{found}")),
            ResolveError::NamedVoidValue {
                function,
                ident,
                span,
            } => diagnostic
                .with_message(format!(
                    "void value cannot be named {}",
                    Scope::Local { function }.render(ident, interner)
                ))
                .with_label(span, "this instruction produces no value"),
            ResolveError::TypeMismatch {
                expected,
                found,
                span,
            } => diagnostic
                .with_message(format!("expected {expected}, found `{found}`"))
                .with_label(span, "type mismatch"),
            ResolveError::InvalidConstant { message, span } => diagnostic
                .with_message(format!("invalid constant: {message}"))
                .with_label(span, "here"),
            ResolveError::MalformedSkeleton { message, span } => diagnostic
                .with_message(message)
                .with_label(span, "while resolving this")
                .with_note("this is a bug in the resolver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicate_diagnostic_has_both_locations() {
        let interner = StringInterner::new();
        let err = ResolveError::DuplicateIdentifier {
            scope: Scope::Global,
            ident: Ident::Name(interner.intern("foo")),
            first: Span::new(0, 3),
            second: Span::new(10, 13),
        };
        assert_eq!(err.code(), ErrorCode::E2001);
        let diag = err.into_diagnostic(&interner);
        assert_eq!(diag.message, "global `@foo` is defined more than once");
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[0].span, Span::new(10, 13));
        assert!(diag.labels[0].is_primary);
        assert_eq!(diag.labels[1].span, Span::new(0, 3));
    }

    #[test]
    fn test_local_scope_names_function() {
        let interner = StringInterner::new();
        let err = ResolveError::UnresolvedIdentifier {
            scope: Scope::Local {
                function: Ident::Name(interner.intern("main")),
            },
            ident: Ident::Id(4),
            span: Span::new(5, 7),
        };
        assert_eq!(err.to_string(), "use of undefined local value");
        let diag = err.into_diagnostic(&interner);
        assert_eq!(diag.message, "use of undefined local value `%4` in `@main`");
        assert_eq!(diag.labels[0].message, "not defined in this function");
    }

    #[test]
    fn test_self_referential_lists_cycle() {
        let interner = StringInterner::new();
        let err = ResolveError::SelfReferentialType {
            names: vec![
                Ident::Name(interner.intern("b")),
                Ident::Name(interner.intern("c")),
                Ident::Name(interner.intern("b")),
            ],
            span: Span::new(0, 2),
        };
        assert_eq!(err.code(), ErrorCode::E2004);
        let diag = err.into_diagnostic(&interner);
        assert_eq!(diag.message, "named type refers to itself: %b -> %c -> %b");
    }
}
