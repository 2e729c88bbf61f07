//! Edge case and end-to-end tests for thcc-par.
