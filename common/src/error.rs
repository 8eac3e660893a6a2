use thiserror::Error;

/// Caller contract violations detected before or during narration.
///
/// None of these are recoverable at runtime: they mean the trace handed over
/// was not a completed, trimmed trace.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum TraceError {
    /// The trace holds no hops at all.
    #[error("trace contains no hops")]
    EmptyTrace,
    /// No hop in the trace ever answered.
    #[error("trace contains no responding hop")]
    NoResolvableHop,
    /// More than one unresponsive hop precedes the first answer.
    #[error("trace starts with {count} unresponsive hops, only the router may be silent")]
    LeadingPendingRun { count: usize },
    /// Segmentation left no portion besides the destination segment.
    #[error("trace collapses into a single segment, there is no path to describe")]
    MissingEnding,
}
