//! # Narrative Assembler
//!
//! Turns a completed trace into the story of the packet's journey, told in
//! the voice of the destination server's operator.
//!
//! The assembler is a linear state machine:
//!
//! ```text
//! Start -> FirstSegment -> IntermediateSegments -> Ending -> Done
//! ```
//!
//! Every stage reads and updates one `NarrativeContext`, which owns the
//! paragraphs written so far together with the one-shot caveat flags and the
//! [`NetworkDescriber`](crate::describe::NetworkDescriber) used for phrasing.

mod context;
mod ending;
mod intermediate;
mod opening;

use hoptale_common::config::Config;
use hoptale_common::error::TraceError;
use hoptale_common::trace::{self, Hop};
use tracing::debug;

use crate::segment::{self, Portion, Segmentation};
use context::NarrativeContext;
use opening::RouterReference;

pub use context::{IntermediatesBucket, Paragraph};

#[derive(Debug)]
pub(crate) enum Stage {
    Start,
    FirstSegment {
        portion: Portion,
        router: RouterReference,
    },
    IntermediateSegments,
    Ending,
    Done,
}

/// Narrates a completed trace.
///
/// # Errors
///
/// Returns a [`TraceError`] when the trace breaks the caller contract, or
/// when segmentation leaves nothing in front of the ending.
pub fn narrate(hops: &[Hop], config: &Config) -> Result<Vec<Paragraph>, TraceError> {
    trace::validate(hops)?;

    let Segmentation {
        mut portions,
        tail,
    } = segment::segment(hops);
    if portions.is_empty() {
        return Err(TraceError::MissingEnding);
    }

    let mut ctx = NarrativeContext::new(config, hops.first());
    let mut stage = Stage::Start;

    loop {
        debug!(stage = stage.name(), remaining = portions.len(), "narrative stage");
        stage = match stage {
            Stage::Start => opening::start(&mut ctx, &mut portions),
            Stage::FirstSegment { portion, router } => {
                opening::first_segment(&mut ctx, portion, router);
                Stage::IntermediateSegments
            }
            Stage::IntermediateSegments => {
                intermediate::intermediate_segments(&mut ctx, &mut portions);
                Stage::Ending
            }
            Stage::Ending => {
                ending::ending(&mut ctx, &portions, &tail);
                Stage::Done
            }
            Stage::Done => break,
        };
    }

    Ok(ctx.into_paragraphs())
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::FirstSegment { .. } => "first-segment",
            Stage::IntermediateSegments => "intermediate-segments",
            Stage::Ending => "ending",
            Stage::Done => "done",
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
