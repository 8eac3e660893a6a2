//! Networks between the first segment and the hosting provider.

use std::collections::VecDeque;

use hoptale_common::trace::{NetworkInfo, NetworkType};
use tracing::debug;

use super::context::{IntermediatesBucket, NarrativeContext, SilentProbe};
use crate::describe::are_names_similar;
use crate::segment::{self, Portion};

pub(super) fn intermediate_segments(
    ctx: &mut NarrativeContext<'_>,
    portions: &mut VecDeque<Portion>,
) {
    *portions = segment::rechunk_by_asn(std::mem::take(portions));

    if !ctx.is_straight_entry_from_isp
        && portions.front().is_some_and(Portion::is_pending)
        && let Some(silent) = portions.pop_front()
    {
        ctx.clarify_no_response(&silent.hops, SilentProbe::Next);
    }

    let responding: Vec<&Portion> = portions.iter().filter(|p| !p.is_pending()).collect();
    debug!(networks = responding.len(), "intermediate networks");

    match responding.as_slice() {
        [] => ctx.intermediates = IntermediatesBucket::None,
        [single] => {
            ctx.intermediates = IntermediatesBucket::OneToThree;
            describe_single_hop(ctx, single.key.network_info.as_ref());
        }
        [first, second] => {
            ctx.intermediates = IntermediatesBucket::OneToThree;
            let first = ctx.describer.describe_tersely(first.key.network_info.as_ref());
            let second = ctx.describer.describe_tersely(second.key.network_info.as_ref());
            ctx.push(&format!("接下来，你经过了两个网络：{first}和{second}。"));
        }
        [leading @ .., last] => {
            let long_haul = responding.len() >= 4;
            ctx.intermediates = if long_haul {
                IntermediatesBucket::FourPlus
            } else {
                IntermediatesBucket::OneToThree
            };

            let listed = leading
                .iter()
                .map(|portion| ctx.describer.describe_tersely(portion.key.network_info.as_ref()))
                .collect::<Vec<String>>()
                .join("、");
            let last = ctx.describer.describe_tersely(last.key.network_info.as_ref());
            let connective = if long_haul { "最后" } else { "和" };
            ctx.push(&format!(
                "接下来，你走了一条漫长而曲折的路径，依次经过了{listed}，{connective}{last}。"
            ));
        }
    }

    let last_index = portions.len().checked_sub(1);
    for (idx, portion) in portions.iter().enumerate() {
        // The final portion may lead straight into the ending.
        if !ctx.is_straight_entry_from_isp && Some(idx) == last_index {
            ctx.clarify_no_response(&portion.hops, SilentProbe::Earlier);
        }
        ctx.is_straight_entry_from_isp = false;
        if !portion.is_pending()
            && let Some(hop) = portion.last_done()
        {
            ctx.prev_hop = Some(hop.clone());
        }
    }

    debug!(bucket = ?ctx.intermediates, "intermediate segments done");
}

fn describe_single_hop(ctx: &mut NarrativeContext<'_>, network_info: Option<&NetworkInfo>) {
    let (prefix, description) = match network_info {
        Some(NetworkInfo {
            network: Some(network),
            ..
        }) => {
            let (name, owner) = (network.name.trim(), network.organization.name.trim());
            let prefix = if are_names_similar(name, owner) {
                format!("你通过{name}进行了一次中间跳转")
            } else {
                format!("你通过{name}进行了一次中间跳转，这是一个由{owner}拥有的网络")
            };
            (prefix, ctx.describer.describe(network.network_type, true))
        }
        Some(info) => (
            format!("你通过AS{}进行了一次中间跳转", info.asn),
            ctx.describer.describe(NetworkType::Other, true),
        ),
        None => {
            let unidentified = ctx.describer.describe_unidentified();
            (
                format!("你通过{unidentified}进行了一次中间跳转"),
                ctx.describer.describe(NetworkType::Other, true),
            )
        }
    };

    // A description that is already a clause reads better as its own sentence.
    if description.contains([',', '，']) {
        ctx.push(&format!("{prefix}。他们是{description}。"));
    } else {
        ctx.push(&format!("{prefix}，{description}。"));
    }
}
