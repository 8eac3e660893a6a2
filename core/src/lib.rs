//! # Hoptale Core
//!
//! Turns a completed traceroute into prose.
//!
//! * **[`segment`]**: groups hops into network portions.
//! * **[`describe`]**: varied wording for network classifications.
//! * **[`narrative`]**: the stage machine producing paragraphs ([`narrate`]).
//! * **[`frequency`]**: the ASN summary shown beside the narrative ([`summarize`]).

pub mod describe;
pub mod frequency;
pub mod narrative;
pub mod segment;

pub use frequency::{AsnSummary, summarize};
pub use narrative::{IntermediatesBucket, Paragraph, narrate};
