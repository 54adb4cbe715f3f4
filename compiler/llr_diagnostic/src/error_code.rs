use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Resolution errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid token
    E0001,
    /// Invalid escape sequence in a string
    E0002,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected type
    E1002,
    /// Expected value
    E1003,
    /// Integer literal out of range
    E1004,
    /// Landing pad that catches nothing
    E1005,

    // Resolution Errors (E2xxx)
    /// Duplicate identifier
    E2001,
    /// Unresolved identifier
    E2002,
    /// Named type without a body
    E2003,
    /// Self-referential named type
    E2004,
    /// Explicit local number out of sequence
    E2005,
    /// Name given to a void value
    E2006,
    /// Type mismatch
    E2007,
    /// Constant does not fit its type
    E2008,

    // Internal Errors (E9xxx)
    /// Malformed skeleton (internal defect)
    E9001,
}

impl ErrorCode {
    /// Check if this is a parser/syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this reports a resolver defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            // Resolution
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E2001.as_str(), "E2001");
    }

    #[test]
    fn test_phase_ranges() {
        assert!(ErrorCode::E1005.is_parser_error());
        assert!(!ErrorCode::E2001.is_parser_error());
        assert!(ErrorCode::E9001.is_internal());
        assert!(!ErrorCode::E2008.is_internal());
    }
}
