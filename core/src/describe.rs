//! # Network Describer
//!
//! Produces varied descriptions of network classifications. The first
//! mention of a classification gets the long explanation, later mentions get
//! progressively terser labels.
//!
//! All state lives in a [`NetworkDescriber`] value scoped to one narrative.

use std::collections::HashMap;

use hoptale_common::trace::{NetworkInfo, NetworkType};

const NO_INFORMATION: &str = "我找不到太多相关信息";
const UNKNOWN_LABEL: &str = "???";
const ANOTHER: &str = "另一个";

struct Phrasing {
    /// Used the first time the classification comes up.
    long: &'static str,
    short: &'static str,
    /// `None` for labels that cannot take an article.
    article: Option<&'static str>,
    supports_another: bool,
    /// Replaces the article form on the second mention of article-less labels.
    second_mention: Option<&'static str>,
}

fn phrasing(network_type: NetworkType) -> Option<Phrasing> {
    let phrasing = match network_type {
        NetworkType::Nsp => Phrasing {
            long: "一个网络服务提供商，也就是向其他公司出售互联网接入的公司",
            short: "NSP",
            article: Some("一个"),
            supports_another: true,
            second_mention: None,
        },
        NetworkType::Content => Phrasing {
            long: "一个内容分发网络",
            short: "CDN",
            article: Some("一个"),
            supports_another: true,
            second_mention: None,
        },
        NetworkType::Isp => Phrasing {
            long: "一个互联网服务提供商",
            short: "ISP",
            article: Some("一个"),
            supports_another: true,
            second_mention: None,
        },
        NetworkType::NspOrIsp => Phrasing {
            long: "要么是一个ISP，要么是向其他公司出售互联网接入的提供商",
            short: "NSP/ISP",
            article: Some("一个"),
            supports_another: true,
            second_mention: None,
        },
        NetworkType::Enterprise => Phrasing {
            long: "一个大型企业网络",
            short: "企业网络",
            article: Some("一个"),
            supports_another: false,
            second_mention: None,
        },
        NetworkType::Educational => Phrasing {
            long: "某个教育机构",
            short: "教育网络",
            article: None,
            supports_another: false,
            second_mention: Some("另一个教育机构"),
        },
        NetworkType::NonProfit => Phrasing {
            long: "一个非营利组织拥有的网络",
            short: "非营利网络",
            article: Some("一个"),
            supports_another: false,
            second_mention: None,
        },
        NetworkType::Government => Phrasing {
            long: "一个政府拥有的网络",
            short: "政府网络",
            article: None,
            supports_another: false,
            second_mention: Some("另一个政府网络"),
        },
        NetworkType::RouteServer => Phrasing {
            long: "与一台路由服务器相关联，它帮助管理BGP会话，但不一定拥有自己的网络",
            short: "路由服务器",
            article: Some("一台"),
            supports_another: true,
            second_mention: None,
        },
        NetworkType::NetworkServices => Phrasing {
            long: "一个网络基础设施提供商",
            short: "基础设施提供商",
            article: None,
            supports_another: false,
            second_mention: Some("另一个基础设施提供商"),
        },
        NetworkType::RouteCollector => Phrasing {
            long: "一个路由收集器，也就是一个只尝试接收所有BGP路由的网络",
            short: "路由收集器",
            article: Some("一个"),
            supports_another: true,
            second_mention: None,
        },
        NetworkType::Other => return None,
    };
    Some(phrasing)
}

/// Stateful phrase picker for one narrative.
#[derive(Debug, Default, Clone)]
pub struct NetworkDescriber {
    mentions: HashMap<NetworkType, usize>,
    unidentified: usize,
}

impl NetworkDescriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describes a classification, taking earlier mentions into account.
    ///
    /// `needs_article` asks for a form that can stand alone after a comma
    /// ("一个CDN") instead of a bare label ("CDN").
    pub fn describe(&mut self, network_type: NetworkType, needs_article: bool) -> String {
        let Some(phrasing) = phrasing(network_type) else {
            let filler = if needs_article { NO_INFORMATION } else { UNKNOWN_LABEL };
            return filler.to_string();
        };

        let count = self.bump(network_type);

        if count == 0 {
            return phrasing.long.to_string();
        }
        if count == 1
            && needs_article
            && let Some(second) = phrasing.second_mention
        {
            return second.to_string();
        }
        if count == 1 && phrasing.supports_another {
            return format!("{ANOTHER}{}", phrasing.short);
        }
        if needs_article {
            return match phrasing.article {
                Some(article) => format!("{article}{}", phrasing.short),
                None => phrasing.long.to_string(),
            };
        }
        phrasing.short.to_string()
    }

    /// Records a mention of `network_type` without producing text.
    pub fn note_mention(&mut self, network_type: NetworkType) {
        if network_type != NetworkType::Other {
            self.bump(network_type);
        }
    }

    /// "一个未识别的网络" once, "另一个未识别的网络" afterwards.
    pub fn describe_unidentified(&mut self) -> String {
        self.unidentified += 1;
        if self.unidentified == 1 {
            "一个未识别的网络".to_string()
        } else {
            format!("{ANOTHER}未识别的网络")
        }
    }

    /// One-line label for list enumerations: `name (label)`, `AS<n> (???)`,
    /// or an unidentified network.
    pub fn describe_tersely(&mut self, network_info: Option<&NetworkInfo>) -> String {
        match network_info {
            Some(NetworkInfo {
                network: Some(network),
                ..
            }) => {
                let label = self.describe(network.network_type, false);
                format!("{} ({label})", network.name.trim())
            }
            Some(info) => format!("AS{} ({UNKNOWN_LABEL})", info.asn),
            None => self.describe_unidentified(),
        }
    }

    fn bump(&mut self, network_type: NetworkType) -> usize {
        let count = self.mentions.entry(network_type).or_insert(0);
        let before = *count;
        *count += 1;
        before
    }
}

/// Whether a network's name already tells the reader who owns it.
///
/// After trimming, the names are equal or one contains the other.
pub fn are_names_similar(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a == b || a.contains(b) || b.contains(a)
}
