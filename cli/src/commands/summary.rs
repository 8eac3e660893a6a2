use std::path::Path;

use colored::*;
use hoptale_common::config::HostingProvider;
use hoptale_core::{AsnSummary, summarize};

use crate::commands::load_trace;
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub fn summarize_trace(path: &Path, hosting: &HostingProvider, json: bool) -> anyhow::Result<()> {
    let trace = load_trace(path)?;
    let summary = summarize(&trace.hops, hosting);

    if json {
        print::print(&serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print::banner();
    print::header("asn summary");
    print_path(&summary);
    print_modal_network(&summary);
    print::end_of_program();
    Ok(())
}

fn print_path(summary: &AsnSummary) {
    if summary.ordered_asn_labels.is_empty() {
        print::centerln(&"no hop resolved to a network".red().bold().to_string());
        return;
    }

    print::tree_head(0, "path");
    let hops: Vec<Detail> = summary
        .ordered_asn_labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (format!("#{}", idx + 1), label.color(colors::ASN)))
        .collect();
    print::as_tree_one_level(hops);

    if let Some((from, to)) = &summary.connection_pair {
        print::tree_head(1, "first link");
        print::as_tree_one_level(vec![
            ("from".to_string(), from.color(colors::ASN)),
            ("to".to_string(), to.color(colors::ASN)),
        ]);
    }
}

fn print_modal_network(summary: &AsnSummary) {
    let Some(name) = &summary.modal_network_name else {
        return;
    };

    print::set_key_width(["network", "seen"]);
    let name = if summary.highlight_modal_network {
        name.color(colors::NETWORK_NAME).bold()
    } else {
        name.color(colors::TEXT_DEFAULT)
    };
    print::aligned_line("network", name);
    print::aligned_line("seen", summary.modal_network_count_phrase.as_str());
}
