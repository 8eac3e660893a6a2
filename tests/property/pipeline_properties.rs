use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};

use hoptale_common::error::TraceError;
use hoptale_common::trace::{DoneHop, Hop, Network, NetworkType, Organization};
use hoptale_core::describe::NetworkDescriber;
use hoptale_core::segment::{Portion, group, rechunk_by_asn, sandwich_merge, segment};
use hoptale_core::{narrate, summarize};
use hoptale_integration_tests::fixtures::config;
use proptest::prelude::*;

const TYPES: [NetworkType; 12] = [
    NetworkType::Nsp,
    NetworkType::Content,
    NetworkType::Isp,
    NetworkType::NspOrIsp,
    NetworkType::Enterprise,
    NetworkType::Educational,
    NetworkType::NonProfit,
    NetworkType::Government,
    NetworkType::RouteServer,
    NetworkType::NetworkServices,
    NetworkType::RouteCollector,
    NetworkType::Other,
];

fn arb_network_type() -> impl Strategy<Value = NetworkType> {
    prop::sample::select(TYPES.to_vec())
}

/// Small ASN and organization ranges so that runs and sandwiches are common.
fn arb_hop() -> impl Strategy<Value = Hop> {
    let done = (
        any::<u8>(),
        prop::option::of(1u32..5),
        prop::option::of((0u64..3, arb_network_type())),
        any::<bool>(),
    )
        .prop_map(|(octet, asn, network, named)| {
            let mut hop = DoneHop::new(IpAddr::V4(Ipv4Addr::new(198, 51, 100, octet)));
            if named {
                hop = hop.with_hostname(format!("hop{octet}.example"));
            }
            match (asn, network) {
                (Some(asn), Some((org, network_type))) => {
                    let network = Network::new(
                        u64::from(asn),
                        format!("net{asn}"),
                        Organization::new(org, format!("org{org}")),
                        network_type,
                    );
                    hop.with_network(asn, network)
                }
                (Some(asn), None) => hop.with_asn(asn),
                (None, _) => hop,
            }
        })
        .prop_map(Hop::from);

    prop_oneof![1 => Just(Hop::Pending), 3 => done]
}

fn flatten<'a>(portions: impl IntoIterator<Item = &'a Portion>) -> Vec<Hop> {
    portions.into_iter().flat_map(|p| p.hops.clone()).collect()
}

proptest! {
    #[test]
    fn every_pass_preserves_the_hops(hops in prop::collection::vec(arb_hop(), 0..24)) {
        let grouped = group(&hops);
        prop_assert_eq!(flatten(&grouped), hops.clone());

        let merged = sandwich_merge(grouped);
        prop_assert_eq!(flatten(&merged), hops.clone());
        prop_assert!(merged.iter().all(|p| !p.is_empty()));

        let segmentation = segment(&hops);
        let mut reassembled = flatten(&segmentation.portions);
        reassembled.extend(segmentation.tail.iter().cloned());
        prop_assert_eq!(reassembled, hops.clone());

        let chunks = rechunk_by_asn(segmentation.portions.clone());
        prop_assert_eq!(flatten(&chunks), flatten(&segmentation.portions));
    }

    #[test]
    fn sandwich_merge_is_idempotent(hops in prop::collection::vec(arb_hop(), 0..24)) {
        let once = sandwich_merge(group(&hops));
        let twice = sandwich_merge(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn describer_is_deterministic(
        calls in prop::collection::vec((arb_network_type(), any::<bool>()), 0..40)
    ) {
        let mut left = NetworkDescriber::new();
        let mut right = NetworkDescriber::new();
        let mut seen: HashSet<NetworkType> = HashSet::new();

        for (network_type, needs_article) in calls {
            let text = left.describe(network_type, needs_article);
            prop_assert_eq!(&text, &right.describe(network_type, needs_article));
            if seen.insert(network_type) {
                prop_assert!(!text.starts_with("另一个"), "first mention was {}", text);
            }
        }
    }

    #[test]
    fn collapsed_asns_never_repeat(hops in prop::collection::vec(arb_hop(), 0..32)) {
        let summary = summarize(&hops, &config().hosting);
        prop_assert!(summary.ordered_asn_labels.windows(2).all(|pair| pair[0] != pair[1]));
        prop_assert_eq!(summary.connection_pair.is_some(), summary.ordered_asn_labels.len() >= 2);
    }

    #[test]
    fn narrate_is_total_on_valid_traces(hops in prop::collection::vec(arb_hop(), 1..24)) {
        match narrate(&hops, &config()) {
            Ok(paragraphs) => {
                prop_assert!(!paragraphs.is_empty());
                for paragraph in &paragraphs {
                    let text = paragraph.as_str();
                    prop_assert!(!text.is_empty());
                    prop_assert_eq!(text, text.trim());
                    prop_assert!(!text.contains("  "));
                }
                let notes = paragraphs.iter().filter(|p| p.as_str().starts_with("（旁注")).count();
                prop_assert!(notes <= 1);
            }
            Err(TraceError::EmptyTrace) => prop_assert!(false, "input was not empty"),
            Err(_) => {}
        }
    }
}
