//! thcc-util - Foundation types for the thcc front-end.
//!
//! This crate holds the small set of types every compiler phase shares:
//!
//! - [`Span`]: a byte range plus the 1-based line/column of its first byte.
//!   Produced by the lexer, embedded in tokens, and carried by diagnostics.
//! - [`Diagnostic`], [`Level`], [`Handler`]: the diagnostic channel. One
//!   handler exists per input file; the lexer and parser record errors and
//!   warnings into it, and the driver renders them as
//!   `file:line:col: message`.
//!
//! The crate deliberately has no dependencies and no I/O: it is the leaf of
//! the workspace dependency graph (span → token → lexer → parser → driver).

mod diagnostic;
mod span;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
