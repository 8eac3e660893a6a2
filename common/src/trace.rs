//! # Completed Trace
//!
//! The input handed over by the trace-resolution side: an ordered hop list,
//! guaranteed to be finished probing. [`validate`] enforces the caller
//! contract every consumer in this workspace relies on.

pub mod hop;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
pub use hop::{DoneHop, Hop, Network, NetworkInfo, NetworkType, Organization};

/// A finished trace as it arrives on disk or over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub hops: Vec<Hop>,
}

/// Checks the hop-level preconditions of narration.
///
/// * At least one hop.
/// * At least one hop answered.
/// * No run of unresponsive hops in front of the user's router. Only the
///   router itself may be silent; anything longer is expected to be trimmed
///   by the caller.
pub fn validate(hops: &[Hop]) -> Result<(), TraceError> {
    if hops.is_empty() {
        return Err(TraceError::EmptyTrace);
    }

    let leading = hops.iter().take_while(|hop| hop.is_pending()).count();
    if leading == hops.len() {
        return Err(TraceError::NoResolvableHop);
    }
    if leading > 1 {
        return Err(TraceError::LeadingPendingRun { count: leading });
    }

    Ok(())
}
