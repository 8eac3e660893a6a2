//! # Frequency Analyzer
//!
//! Summarizes which autonomous systems a trace passed through, for the
//! diagram shown next to the narrative. Works on the raw hops and is
//! independent of segmentation.

use std::collections::BTreeMap;

use hoptale_common::config::HostingProvider;
use hoptale_common::trace::Hop;
use serde::Serialize;
use tracing::debug;

const CARDINALS: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// A network seen at least this often is highlighted.
const HIGHLIGHT_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsnSummary {
    /// `AS<n>` for every resolved hop, consecutive repeats collapsed.
    pub ordered_asn_labels: Vec<String>,
    /// First adjacent pair of [`Self::ordered_asn_labels`].
    pub connection_pair: Option<(String, String)>,
    pub highlight_modal_network: bool,
    /// `None` when no hop resolved an ASN.
    pub modal_network_name: Option<String>,
    /// "这 三", "所有 五" and so on.
    pub modal_network_count_phrase: String,
}

pub fn summarize(hops: &[Hop], hosting: &HostingProvider) -> AsnSummary {
    let asns: Vec<u32> = hops.iter().filter_map(Hop::asn).collect();

    let mut frequency: BTreeMap<u32, usize> = BTreeMap::new();
    for asn in &asns {
        *frequency.entry(*asn).or_insert(0) += 1;
    }

    let (modal_asn, modal_count) = modal_asn(&frequency, hosting.asn);
    debug!(?modal_asn, modal_count, distinct = frequency.len(), "ASN frequency");

    let modal_network_name = modal_asn.map(|modal| {
        hops.iter()
            .filter_map(Hop::network_info)
            .find(|info| info.asn == modal)
            .and_then(|info| info.network.as_ref())
            .map(|network| network.name.trim().to_string())
            .unwrap_or_else(|| format!("AS{modal}"))
    });

    let mut collapsed = asns;
    collapsed.dedup();
    let ordered_asn_labels: Vec<String> = collapsed.iter().map(|asn| format!("AS{asn}")).collect();
    let connection_pair = match ordered_asn_labels.as_slice() {
        [first, second, ..] => Some((first.clone(), second.clone())),
        _ => None,
    };

    AsnSummary {
        ordered_asn_labels,
        connection_pair,
        highlight_modal_network: modal_count >= HIGHLIGHT_THRESHOLD,
        modal_network_name,
        modal_network_count_phrase: count_phrase(modal_count),
    }
}

/// Most frequent ASN, preferring anything but the hosting provider.
///
/// The hosting ASN is only considered when no other network shows up more
/// than twice, and even then it has to be strictly more frequent.
fn modal_asn(frequency: &BTreeMap<u32, usize>, hosting_asn: u32) -> (Option<u32>, usize) {
    fn pick(
        frequency: &BTreeMap<u32, usize>,
        mut best: (Option<u32>, usize),
        skip: Option<u32>,
    ) -> (Option<u32>, usize) {
        for (&asn, &count) in frequency {
            if Some(asn) != skip && count > best.1 {
                best = (Some(asn), count);
            }
        }
        best
    }

    let best = pick(frequency, (None, 0), Some(hosting_asn));
    if best.1 <= HIGHLIGHT_THRESHOLD {
        return pick(frequency, best, None);
    }
    best
}

fn count_phrase(count: usize) -> String {
    let scope = if count <= 3 { "这" } else { "所有" };
    let number = count
        .checked_sub(1)
        .and_then(|idx| CARDINALS.get(idx))
        .map(|word| word.to_string())
        .unwrap_or_else(|| count.to_string());
    format!("{scope} {number}")
}
