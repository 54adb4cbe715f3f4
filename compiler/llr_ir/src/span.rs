//! Byte-offset source spans.

use std::fmt;

/// Error when a byte range does not fit the 32-bit span encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// Range start exceeds `u32::MAX`.
    StartTooLarge(usize),
    /// Range end exceeds `u32::MAX`.
    EndTooLarge(usize),
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::StartTooLarge(v) => write!(f, "span start {v} exceeds u32::MAX"),
            SpanError::EndTooLarge(v) => write!(f, "span end {v} exceeds u32::MAX"),
        }
    }
}

impl std::error::Error for SpanError {}

/// Half-open byte range `start..end` into one source file.
///
/// Eight bytes, `Copy`. Identifier tables keep one per declaration so
/// duplicate diagnostics can point at both definitions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for entities with no source text (tests, synthesized nodes).
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Convert a lexer byte range, failing for sources over 4 GiB.
    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        let start =
            u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end })
    }

    /// Convert a lexer byte range.
    ///
    /// # Panics
    /// Panics if the range exceeds `u32::MAX`. Use `try_from_range` for
    /// untrusted input sizes.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::try_from_range(range).unwrap_or_else(|e| panic!("{e}"))
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_covers_both() {
        let a = Span::new(4, 9);
        let b = Span::new(2, 6);
        assert_eq!(a.merge(b), Span::new(2, 9));
        assert_eq!(b.merge(a), Span::new(2, 9));
    }

    #[test]
    fn test_try_from_range_rejects_overflow() {
        let big = u32::MAX as usize + 1;
        assert_eq!(
            Span::try_from_range(0..big),
            Err(SpanError::EndTooLarge(big))
        );
        assert_eq!(Span::try_from_range(3..7), Ok(Span::new(3, 7)));
    }

    #[test]
    fn test_point_is_empty() {
        let p = Span::point(12);
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(format!("{p:?}"), "12..12");
    }
}
