use hoptale_common::error::TraceError;
use hoptale_common::trace::{DoneHop, Hop, NetworkType, Trace};
use hoptale_core::segment::{group, sandwich_merge};
use hoptale_core::{Paragraph, narrate, summarize};
use hoptale_integration_tests::fixtures::*;

fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
    paragraphs.iter().map(Paragraph::as_str).collect()
}

#[test]
fn gap_between_same_network_is_absorbed() {
    let hops = vec![
        isp(ip(0, 1), 1, "Home ISP"),
        asn_only(ip(0, 2), 2),
        pending(),
        asn_only(ip(0, 3), 2),
    ];

    let portions = sandwich_merge(group(&hops));

    assert_eq!(portions.len(), 2);
    assert_eq!(portions[1].hops, hops[1..].to_vec());
    assert!(portions[1].hops[1].is_pending());
}

#[test]
fn hosting_entry_point_takes_hosting_branch_only() {
    let cfg = config();
    let hops = vec![
        isp(ip(0, 1), 3320, "DTAG"),
        isp(ip(0, 2), 3320, "DTAG"),
        nsp(ip(1, 1), 1299, "Arelion"),
        hosting(1).into(),
        server(),
    ];

    let paragraphs = narrate(&hops, &cfg).unwrap();
    let text = texts(&paragraphs);
    let closing = text.last().unwrap();

    assert!(closing.starts_with("最终，你需要离开Arelion的领域"));
    assert!(closing.contains("入口点是213.239.0.1"));
    assert!(text.iter().all(|p| !p.contains("没有响应的探测")));
}

#[test]
fn server_as_first_hosting_hop_takes_silent_branch() {
    let cfg = config();
    let hops = vec![isp(ip(0, 1), 3320, "DTAG"), pending(), server()];

    let paragraphs = narrate(&hops, &cfg).unwrap();
    let closing = paragraphs.last().unwrap().as_str();

    assert!(closing.contains("没有响应的探测"));
    assert!(!closing.contains("入口点是"));
}

#[test]
fn reverse_dns_note_appears_once() {
    let cfg = config();
    let hops = vec![
        Hop::from(
            network_hop(ip(0, 1), 3320, "DTAG", NetworkType::Isp).with_hostname("p1.dtag.example"),
        ),
        Hop::from(
            network_hop(ip(1, 1), 1299, "Arelion", NetworkType::Nsp)
                .with_hostname("core1.arelion.example"),
        ),
        Hop::from(hosting(1).with_hostname("core21.fsn1.hetzner.example")),
        Hop::from(hosting(2).with_hostname("ex9k1.dc1.fsn1.hetzner.example")),
        server(),
    ];

    let paragraphs = narrate(&hops, &cfg).unwrap();
    let notes = paragraphs
        .iter()
        .filter(|p| p.as_str().starts_with("（旁注"))
        .count();

    assert_eq!(notes, 1);
    assert!(paragraphs.last().unwrap().as_str().contains("core21.fsn1.hetzner.example"));
}

#[test]
fn four_intermediate_networks_use_finally() {
    let cfg = config();
    let hops = vec![
        isp(ip(0, 1), 3320, "DTAG"),
        isp(ip(0, 2), 3320, "DTAG"),
        nsp(ip(1, 1), 1299, "Arelion"),
        nsp(ip(2, 1), 174, "Cogent"),
        nsp(ip(3, 1), 3356, "Lumen"),
        nsp(ip(4, 1), 6939, "Hurricane Electric"),
        hosting(1).into(),
        server(),
    ];

    let paragraphs = narrate(&hops, &cfg).unwrap();
    let text = texts(&paragraphs);

    assert!(text[2].contains("，最后Hurricane Electric (NSP)。"));
    assert!(text[3].starts_with("在所有这些之后"));
}

#[test]
fn silent_router_then_unidentified_network() {
    let cfg = config();
    let hops = vec![
        pending(),
        DoneHop::new(ip(9, 1)).into(),
        pending(),
        pending(),
    ];

    let paragraphs = narrate(&hops, &cfg).unwrap();
    let text = texts(&paragraphs);

    assert!(text[0].contains("没有回应我的探测"));
    assert!(text[1].starts_with("在你的路由之后"));
    assert!(text.last().unwrap().contains("其中之一很可能是你进入Hetzner网络的入口点"));
}

#[test]
fn trace_file_round_trip_through_json() {
    let raw = r#"{
        "hops": [
            { "kind": "Done", "ip": "100.64.0.1", "hostname": null,
              "networkInfo": { "asn": 3320, "network": {
                  "id": 1, "name": "DTAG",
                  "organization": { "id": 1, "name": "Deutsche Telekom AG" },
                  "networkType": "Isp" } } },
            { "kind": "Pending" },
            { "kind": "Done", "ip": "213.239.0.1", "networkInfo": { "asn": 24940 } },
            { "kind": "Done", "ip": "5.75.0.10", "hostname": "server.example.org",
              "networkInfo": { "asn": 24940 } }
        ]
    }"#;
    let trace: Trace = serde_json::from_str(raw).unwrap();
    assert_eq!(trace.hops.len(), 4);

    let paragraphs = narrate(&trace.hops, &config()).unwrap();
    assert!(!paragraphs.is_empty());

    let json = serde_json::to_value(&paragraphs).unwrap();
    assert!(json[0].as_str().unwrap().contains("100.64.0.1"));
}

#[test]
fn contract_violations_surface_as_errors() {
    let cfg = config();
    assert_eq!(narrate(&[pending(), pending()], &cfg), Err(TraceError::NoResolvableHop));
    assert_eq!(
        narrate(&[pending(), pending(), server()], &cfg),
        Err(TraceError::LeadingPendingRun { count: 2 })
    );
}

#[test]
fn summary_prefers_hosting_only_over_pairs() {
    let hosting_provider = config().hosting;
    let mut hops = vec![asn_only(ip(0, 1), 1299), asn_only(ip(0, 2), 1299)];
    hops.extend((1..=3).map(|n| Hop::from(hosting(n))));

    let summary = summarize(&hops, &hosting_provider);
    assert_eq!(summary.modal_network_name.as_deref(), Some("AS24940"));

    hops.push(asn_only(ip(0, 3), 1299));
    let summary = summarize(&hops, &hosting_provider);
    assert_eq!(summary.modal_network_name.as_deref(), Some("AS1299"));
    assert_eq!(summary.modal_network_count_phrase, "这 三");
}
