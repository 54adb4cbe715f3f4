//! Diagnostic system for LLVM assembly errors.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Secondary labels (the other definition of a duplicate)
//!
//! Every phase owns a typed error enum and converts it into a
//! [`Diagnostic`] at the boundary; emitters only ever see diagnostics.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
