//! Stack growth for deeply nested input.
//!
//! Types (`[4 x [4 x { i8*, ... }]]`), constant expressions and metadata
//! tuples nest without limit in LLVM assembly, and both the parser and the
//! resolver walk them recursively. Every recursive entry point wraps its
//! body in [`ensure_sufficient_stack`].
//!
//! On native targets the stack grows by `STACK_PER_RECURSION` whenever
//! less than `RED_ZONE` remains. On `wasm32` the closure runs directly.

const RED_ZONE: usize = 100 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
///
/// ```text
/// fn parse_type(&mut self) -> Result<ParsedType, ParseError> {
///     ensure_sufficient_stack(|| self.parse_type_inner())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depth of a type like `[1 x [1 x [1 x i8]]]`, computed recursively.
    fn nesting_depth(text: &[u8]) -> usize {
        ensure_sufficient_stack(|| match text.first() {
            Some(b'[') => 1 + nesting_depth(&text[1..]),
            _ => 0,
        })
    }

    #[test]
    fn test_shallow_nesting() {
        assert_eq!(nesting_depth(b"[[[i8]]]"), 3);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let text = vec![b'['; 100_000];
        assert_eq!(nesting_depth(&text), 100_000);
    }

    #[test]
    fn test_passes_results_through() {
        let result: Result<u32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
