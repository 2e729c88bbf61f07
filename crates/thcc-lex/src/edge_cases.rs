//! Edge case and property tests for thcc-lex.
