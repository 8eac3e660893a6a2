//! Shared builders for the cross-crate test suites.

pub mod fixtures;
