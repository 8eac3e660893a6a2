//! # Segmenter
//!
//! Partitions a completed trace into [`Portion`]s: maximal runs of hops
//! that belong to the same network (or the same silence).
//!
//! The pipeline is:
//! 1. [`group`]: adjacent hops with the same ASN or organization share a portion.
//! 2. [`sandwich_merge`]: an unresponsive gap after a responding portion is
//!    absorbed by it, together with the portion on the other side of the gap
//!    when both sides belong to the same network.
//! 3. [`Segmentation::tail`]: the last portion is held aside for the ending.
//! 4. [`rechunk_by_asn`]: applied later by the narrative, narrows portions
//!    that span several ASNs of one organization.
//!
//! Every step preserves the partition property: concatenating the hops of
//! all portions (and the tail) yields the input, in order.

use std::collections::{BTreeSet, VecDeque};

use hoptale_common::trace::{Hop, Network, NetworkInfo};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortionKind {
    Pending,
    Done,
}

/// Identity of a portion, taken from the hop that opened it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortionKey {
    pub kind: PortionKind,
    /// `None` for silent portions and for responding hops nobody could place.
    pub network_info: Option<NetworkInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portion {
    pub key: PortionKey,
    pub hops: Vec<Hop>,
}

/// Output of [`segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Every portion except the last one.
    pub portions: VecDeque<Portion>,
    /// Hops of the last portion, reserved for the ending.
    pub tail: Vec<Hop>,
}

impl PortionKey {
    pub fn of(hop: &Hop) -> Self {
        match hop {
            Hop::Pending => Self {
                kind: PortionKind::Pending,
                network_info: None,
            },
            Hop::Done(done) => Self {
                kind: PortionKind::Done,
                network_info: done.network_info.clone(),
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        self.kind == PortionKind::Pending
    }

    pub fn asn(&self) -> Option<u32> {
        self.network_info.as_ref().map(|info| info.asn)
    }

    pub fn network(&self) -> Option<&Network> {
        self.network_info.as_ref().and_then(|info| info.network.as_ref())
    }

    /// Whether `hop` continues the run this key opened.
    ///
    /// Consecutive unplaced responding hops form a single run.
    fn admits(&self, hop: &Hop) -> bool {
        match (self.kind, hop) {
            (PortionKind::Pending, Hop::Pending) => true,
            (PortionKind::Done, Hop::Done(done)) => {
                match (&self.network_info, &done.network_info) {
                    (None, None) => true,
                    (Some(ours), Some(theirs)) => same_network(ours, theirs),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Two keys that both carry an identity and agree on it.
    fn shares_identity(&self, other: &PortionKey) -> bool {
        match (&self.network_info, &other.network_info) {
            (Some(ours), Some(theirs)) => same_network(ours, theirs),
            _ => false,
        }
    }
}

fn same_network(a: &NetworkInfo, b: &NetworkInfo) -> bool {
    if a.asn == b.asn {
        return true;
    }
    matches!(
        (a.organization_id(), b.organization_id()),
        (Some(ours), Some(theirs)) if ours == theirs
    )
}

impl Portion {
    fn open(hop: Hop) -> Self {
        Self {
            key: PortionKey::of(&hop),
            hops: vec![hop],
        }
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.key.is_pending()
    }

    pub fn has_pending(&self) -> bool {
        self.hops.iter().any(Hop::is_pending)
    }

    pub fn last_done(&self) -> Option<&Hop> {
        self.hops.iter().rev().find(|hop| !hop.is_pending())
    }

    /// Distinct network records touched by the hops of this portion.
    pub fn distinct_networks(&self) -> usize {
        self.hops
            .iter()
            .filter_map(|hop| hop.network().map(|network| network.id))
            .collect::<BTreeSet<u64>>()
            .len()
    }

    /// Removes and returns the leading hop.
    pub fn take_first(&mut self) -> Option<Hop> {
        if self.hops.is_empty() {
            None
        } else {
            Some(self.hops.remove(0))
        }
    }

    fn absorb(&mut self, other: Portion) {
        self.hops.extend(other.hops);
    }
}

/// Full segmentation: grouping, sandwich merge and tail extraction.
pub fn segment(hops: &[Hop]) -> Segmentation {
    let mut portions: VecDeque<Portion> = sandwich_merge(group(hops)).into();
    let tail = portions.pop_back().map(|portion| portion.hops).unwrap_or_default();

    debug!(
        portions = portions.len(),
        tail = tail.len(),
        "segmented trace of {} hops",
        hops.len()
    );

    Segmentation { portions, tail }
}

/// Groups adjacent hops that share a key.
pub fn group(hops: &[Hop]) -> Vec<Portion> {
    let mut portions: Vec<Portion> = Vec::new();

    for hop in hops {
        match portions.last_mut() {
            Some(current) if current.key.admits(hop) => current.hops.push(hop.clone()),
            _ => portions.push(Portion::open(hop.clone())),
        }
    }

    trace!(portions = portions.len(), "initial grouping");
    portions
}

/// Absorbs unresponsive gaps into the responding portion in front of them.
///
/// * `[A] [?] [A]` becomes `[A ? A]`
/// * `[A] [?] [B]` becomes `[A ?] [B]`
///
/// After a merge the same portion is examined again, since its new neighbour
/// may be another gap. Each round pops at least one portion off the queue.
pub fn sandwich_merge(portions: Vec<Portion>) -> Vec<Portion> {
    let mut queue: VecDeque<Portion> = portions.into();
    let mut merged: Vec<Portion> = Vec::with_capacity(queue.len());

    while let Some(mut first) = queue.pop_front() {
        while !first.is_pending()
            && queue.len() >= 2
            && queue.front().is_some_and(Portion::is_pending)
        {
            let Some(middle) = queue.pop_front() else {
                break;
            };
            first.absorb(middle);

            if queue.front().is_some_and(|last| first.key.shares_identity(&last.key))
                && let Some(last) = queue.pop_front()
            {
                first.absorb(last);
            }
        }
        merged.push(first);
    }

    trace!(portions = merged.len(), "sandwich merge");
    merged
}

/// Splits portions whose responding hops span more than one ASN.
///
/// Grouping works at organization granularity; from the intermediate stage on
/// the narrative only cares about individual networks.
pub fn rechunk_by_asn(portions: VecDeque<Portion>) -> VecDeque<Portion> {
    let mut queue = portions;
    let mut chunks: VecDeque<Portion> = VecDeque::with_capacity(queue.len());

    while let Some(mut portion) = queue.pop_front() {
        let key_asn = portion.key.asn();
        let split_at = portion
            .hops
            .iter()
            .skip(1)
            .position(|hop| !hop.is_pending() && hop.asn() != key_asn)
            .map(|idx| idx + 1);

        if let Some(at) = split_at {
            let rest = portion.hops.split_off(at);
            trace!(at, ?key_asn, "splitting portion on ASN change");
            queue.push_front(Portion {
                key: PortionKey::of(&rest[0]),
                hops: rest,
            });
        }
        chunks.push_back(portion);
    }

    chunks
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
