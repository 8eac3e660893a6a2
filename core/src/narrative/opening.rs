//! Start and first segment: the user's router and the first network behind it.

use std::collections::VecDeque;

use hoptale_common::trace::{DoneHop, Hop, NetworkInfo, NetworkType};
use tracing::debug;

use super::Stage;
use super::context::{NarrativeContext, SilentProbe};
use crate::describe::are_names_similar;
use crate::segment::Portion;

/// How the first segment refers back to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RouterReference {
    /// The router never answered, so it was only imagined.
    Yours,
    /// The router was just introduced by its address.
    That,
}

impl RouterReference {
    fn phrase(self) -> &'static str {
        match self {
            RouterReference::Yours => "你的",
            RouterReference::That => "那个",
        }
    }
}

pub(super) fn start(ctx: &mut NarrativeContext<'_>, portions: &mut VecDeque<Portion>) -> Stage {
    let Some(mut portion) = portions.pop_front() else {
        return Stage::IntermediateSegments;
    };
    let Some(router) = portion.take_first() else {
        return Stage::IntermediateSegments;
    };

    match router {
        Hop::Pending => {
            debug!("router did not answer");
            ctx.push(
                "这段旅程始于你的计算机与你的路由通信。那个路由是你进入ISP网络的入口点，\
                 但它实际上没有回应我的探测，这在公共路由器上或者你处于VPN之后时很常见，\
                 所以我们只能想象它出现在追踪路由的开头。",
            );
            // Leading silent runs are rejected up front, so the router was alone.
            next_first_segment(portions, RouterReference::Yours)
        }
        Hop::Done(router) => {
            introduce_router(ctx, &router);
            if portion.is_empty() {
                next_first_segment(portions, RouterReference::That)
            } else {
                Stage::FirstSegment {
                    portion,
                    router: RouterReference::That,
                }
            }
        }
    }
}

fn next_first_segment(portions: &mut VecDeque<Portion>, router: RouterReference) -> Stage {
    match portions.pop_front() {
        Some(portion) => Stage::FirstSegment { portion, router },
        None => Stage::IntermediateSegments,
    }
}

fn introduce_router(ctx: &mut NarrativeContext<'_>, router: &DoneHop) {
    let identity = match &router.hostname {
        Some(hostname) => format!("（{hostname}，与你的公共IP {} 相关联）", router.ip),
        None => format!("（与你的公共IP {} 相关联）", router.ip),
    };
    let is_isp = router
        .network_info
        .as_ref()
        .and_then(|info| info.network.as_ref())
        .is_some_and(|network| network.network_type == NetworkType::Isp);

    debug!(is_isp, ip = %router.ip, "introducing router");
    if is_isp {
        ctx.push(&format!(
            "这段旅程始于你的计算机与你的路由通信。那个路由是你进入ISP网络的入口点，\
             也是你在追踪路由中看到的第一个项目{identity}。"
        ));
    } else {
        ctx.push(&format!(
            "这段旅程始于你的计算机与你的路由通信。那个路由是你进入互联网的入口点，\
             可能就是你在追踪路由中看到的第一个项目{identity}。或者，你可能处于某种VPN之后，\
             这种情况下我们能追踪到的最早位置，是你的数据包所经过的那个面向互联网的路由。"
        ));
    }
}

/// Narrates the first network behind the router.
pub(super) fn first_segment(
    ctx: &mut NarrativeContext<'_>,
    portion: Portion,
    router: RouterReference,
) {
    ctx.is_straight_entry_from_isp = false;
    if let Some(hop) = portion.last_done() {
        ctx.prev_hop = Some(hop.clone());
    }

    let devices = if portion.len() == 1 { "一个设备" } else { "多个设备" };

    match &portion.key.network_info {
        Some(NetworkInfo {
            network: Some(network),
            ..
        }) => {
            let organization = network.organization.name.trim();
            let networks = if portion.distinct_networks() <= 1 { "网络" } else { "多个网络" };

            let mut text = format!(
                "从{}路由开始，你旅程的第一部分经过了{organization}的{networks}中的{devices}",
                router.phrase()
            );
            if !are_names_similar(&network.name, &network.organization.name) {
                text.push_str(&format!("（{}）", network.name.trim()));
            }
            text.push('。');
            text.push_str(classification_commentary(ctx, network.network_type));

            debug!(organization, network_type = ?network.network_type, "first segment");
            ctx.push(&text);
        }
        Some(info) => {
            debug!(asn = info.asn, "first segment without network record");
            ctx.push(&format!(
                "你旅程的第一部分经过了网络AS{}中的{devices}。除了它的自治系统号码，\
                 我找不到任何相关信息，但很可能是为你提供网络接入的一方在向他们购买互联网接入，\
                 或者他们就是你的VPN提供商。",
                info.asn
            ));
        }
        None => {
            debug!("first segment is unidentified");
            let devices = if portion.len() == 1 { "一个设备" } else { "一些设备" };
            ctx.push(&format!(
                "在{}路由之后，你经过了一个未识别网络中的{devices}，\
                 很可能仍在你的计算机所连接的本地网络内部。",
                router.phrase()
            ));
        }
    }

    ctx.clarify_no_response(&portion.hops, SilentProbe::Earlier);
}

fn classification_commentary(
    ctx: &mut NarrativeContext<'_>,
    network_type: NetworkType,
) -> &'static str {
    match network_type {
        NetworkType::Isp => {
            ctx.describer.note_mention(NetworkType::Isp);
            "那很可能是你的ISP，也就是向你收费、负责把你接入互联网的公司。"
        }
        NetworkType::Nsp | NetworkType::NspOrIsp => {
            // Counts as the ISP mention either way.
            ctx.describer.note_mention(NetworkType::Isp);
            "那要么是你的ISP，也就是向你收费、负责把你接入互联网的公司，\
             要么是你的ISP签约合作的公司。"
        }
        _ => {
            "那是我能找到信息的第一个网络。很可能是为你提供网络接入的一方在向他们购买\
             互联网接入，或者他们就是你的VPN提供商。"
        }
    }
}
