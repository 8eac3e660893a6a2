//! Closing paragraph: how the packet entered the hosting provider's network.

use std::collections::VecDeque;

use hoptale_common::trace::Hop;
use tracing::debug;

use super::context::{NarrativeContext, SilentProbe};
use crate::segment::Portion;

pub(super) fn ending(ctx: &mut NarrativeContext<'_>, portions: &VecDeque<Portion>, tail: &[Hop]) {
    let provider = ctx.config.hosting.name.clone();

    match tail.first() {
        Some(Hop::Done(entry)) if ctx.config.is_hosting_entrypoint(&tail[0]) => {
            debug!(ip = %entry.ip, "entered hosting network through a responding hop");

            if !ctx.is_straight_entry_from_isp
                && let Some(last) = portions.back().and_then(|portion| portion.hops.last())
            {
                ctx.clarify_no_response(std::slice::from_ref(last), SilentProbe::Next);
            }
            ctx.clarify_no_response(tail, SilentProbe::Earlier);

            let entry_point = match &entry.hostname {
                Some(hostname) => hostname.clone(),
                None => entry.ip.to_string(),
            };
            ctx.push(&format!(
                "{}，你需要离开{}的领域才能到达我的服务器。\
                 我使用{provider}作为托管提供商，你进入他们网络的入口点是{entry_point}。\
                 从那里，你在{provider}的内部网络中又被转发了几次，最终到达我的服务器。",
                ctx.closing_transition(),
                ctx.previous_network_name(),
            ));

            if let Some(hostname) = &entry.hostname {
                ctx.clarify_hostname(hostname, entry.ip);
            }
        }
        _ => {
            let silent = tail.iter().rev().take_while(|hop| hop.is_pending()).count();
            debug!(silent, "hosting entry point did not answer");

            let which = if ctx.did_clarify_no_response() { "另一个" } else { "一个" };
            let likely = if silent >= 2 { "其中之一" } else { "这" };
            ctx.push(&format!(
                "{}，我们遇到了{which}没有响应的探测。\
                 {likely}很可能是你进入{provider}网络的入口点（他们是我的托管提供商）。\
                 从那里，你在{provider}的内部网络中又被转发了几次，最终到达我的服务器。",
                ctx.closing_transition(),
            ));
        }
    }
}
