use std::fmt;
use std::net::IpAddr;

use hoptale_common::config::Config;
use hoptale_common::trace::Hop;
use serde::Serialize;
use tracing::trace;

use crate::describe::NetworkDescriber;

/// One paragraph of the narrative: trimmed, with whitespace runs collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn new(text: &str) -> Self {
        Self(text.split_whitespace().collect::<Vec<&str>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many responding networks sat between the first segment and the ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntermediatesBucket {
    #[default]
    None,
    OneToThree,
    FourPlus,
}

/// Which probe a no-response note refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SilentProbe {
    /// A gap already visible in the part of the trace just described.
    Earlier,
    /// The very next probe after the part just described.
    Next,
}

/// State threaded through every stage of one narrative.
pub(crate) struct NarrativeContext<'a> {
    pub(crate) config: &'a Config,
    pub(crate) describer: NetworkDescriber,
    /// True until anything ambiguous sits between the router and the ending.
    pub(crate) is_straight_entry_from_isp: bool,
    /// Most recent responding hop that was narrated.
    pub(crate) prev_hop: Option<Hop>,
    pub(crate) intermediates: IntermediatesBucket,
    paragraphs: Vec<Paragraph>,
    last_was_side_note: bool,
    did_clarify_hostname: bool,
    did_clarify_no_response: bool,
}

impl<'a> NarrativeContext<'a> {
    pub(crate) fn new(config: &'a Config, router: Option<&Hop>) -> Self {
        Self {
            config,
            describer: NetworkDescriber::new(),
            is_straight_entry_from_isp: true,
            prev_hop: router.filter(|hop| !hop.is_pending()).cloned(),
            intermediates: IntermediatesBucket::None,
            paragraphs: Vec::new(),
            last_was_side_note: false,
            did_clarify_hostname: false,
            did_clarify_no_response: false,
        }
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.paragraphs.push(Paragraph::new(text));
        self.last_was_side_note = false;
    }

    fn push_side_note(&mut self, text: &str) {
        self.push(text);
        self.last_was_side_note = true;
    }

    pub(crate) fn did_clarify_no_response(&self) -> bool {
        self.did_clarify_no_response
    }

    /// Explains unanswered probes the first time any of `hops` is silent.
    pub(crate) fn clarify_no_response(&mut self, hops: &[Hop], probe: SilentProbe) {
        if self.did_clarify_no_response || !hops.iter().any(Hop::is_pending) {
            return;
        }

        let opener = match probe {
            SilentProbe::Next => "我们实际上没有从下一个探测得到响应。",
            SilentProbe::Earlier => "顺便一提，注意到那个“(无响应)”了吗？",
        };
        trace!(?probe, "no-response side note");
        self.push_side_note(&format!(
            "{opener}追踪路由中经常出现这样的情况，并不是每台服务器都会稳定地回应我们，\
             互联网本身也并不可靠。这很遗憾，但我们仍然可以从那些确实回应的服务器中\
             很好地了解发生了什么。"
        ));
        self.did_clarify_no_response = true;
    }

    /// Explains where a displayed hostname came from, once per narrative.
    pub(crate) fn clarify_hostname(&mut self, hostname: &str, ip: IpAddr) {
        if self.did_clarify_hostname {
            return;
        }

        trace!(hostname, "reverse-DNS side note");
        self.push_side_note(&format!(
            "（旁注：{hostname}这个名字来自反向DNS查询。我向DNS服务器询问追踪路由实际返回的\
             IP {ip}是否关联了某个名称，因为有，我就用这个更易读的名字代替了数字。\
             反向DNS名称通常只是为了方便调试而设置的，并不一定反映真正拥有这个地址的实体，\
             有时甚至无法解析回原来的IP。）"
        ));
        self.did_clarify_hostname = true;
    }

    /// Opening words of the closing paragraph.
    pub(crate) fn closing_transition(&self) -> &'static str {
        if self.is_straight_entry_from_isp {
            return "总之";
        }
        match self.intermediates {
            IntermediatesBucket::None if self.last_was_side_note => "总之，在几次跳跃之后",
            IntermediatesBucket::None => "在几次跳跃之后",
            IntermediatesBucket::OneToThree => "最终",
            IntermediatesBucket::FourPlus => "在所有这些之后",
        }
    }

    /// Name of the network the packet is leaving before the ending.
    pub(crate) fn previous_network_name(&self) -> String {
        let Some(hop) = &self.prev_hop else {
            return "那个网络".to_string();
        };
        if let Some(network) = hop.network()
            && !network.name.trim().is_empty()
        {
            return network.name.trim().to_string();
        }
        match hop.asn() {
            Some(asn) => format!("AS{asn}"),
            None => "那个网络".to_string(),
        }
    }

    pub(crate) fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }
}
