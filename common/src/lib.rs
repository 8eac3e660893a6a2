//! # Hoptale Common
//!
//! Types shared by every crate in the workspace.
//!
//! * **[`trace`]**: the completed trace handed over by the resolver (hops,
//!   networks, organizations) and its precondition check.
//! * **[`config`]**: deployment identity (hosting provider, destination server).
//! * **[`error`]**: caller contract violations.

pub mod config;
pub mod error;
pub mod trace;
