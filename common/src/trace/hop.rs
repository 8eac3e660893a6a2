//! # Hop Model
//!
//! A completed trace is an ordered list of [`Hop`]s. Probe order is
//! load-bearing: every stage downstream of this module reads hops in the
//! order they were probed and never reorders them.
//!
//! A hop is either unresponsive ([`Hop::Pending`]) or resolved
//! ([`Hop::Done`]) with an address and whatever metadata the resolver
//! managed to attach.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// One probe result in a completed trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Hop {
    /// The probe never got an answer.
    Pending,
    /// The probe was answered by `ip`.
    Done(DoneHop),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoneHop {
    pub ip: IpAddr,
    /// Reverse-DNS name, if the resolver found one.
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub network_info: Option<NetworkInfo>,
}

/// Routing identity of a hop.
///
/// An ASN can be known while its owning [`Network`] record is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub asn: u32,
    #[serde(default)]
    pub network: Option<Network>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: u64,
    pub name: String,
    pub organization: Organization,
    pub network_type: NetworkType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
}

/// Classification of a network, as published in peering registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    Nsp,
    Content,
    Isp,
    NspOrIsp,
    Enterprise,
    Educational,
    NonProfit,
    Government,
    RouteServer,
    NetworkServices,
    RouteCollector,
    Other,
}

impl Hop {
    pub fn is_pending(&self) -> bool {
        matches!(self, Hop::Pending)
    }

    pub fn as_done(&self) -> Option<&DoneHop> {
        match self {
            Hop::Done(done) => Some(done),
            Hop::Pending => None,
        }
    }

    pub fn network_info(&self) -> Option<&NetworkInfo> {
        self.as_done().and_then(|done| done.network_info.as_ref())
    }

    pub fn asn(&self) -> Option<u32> {
        self.network_info().map(|info| info.asn)
    }

    pub fn network(&self) -> Option<&Network> {
        self.network_info().and_then(|info| info.network.as_ref())
    }
}

impl From<DoneHop> for Hop {
    fn from(done: DoneHop) -> Self {
        Hop::Done(done)
    }
}

impl DoneHop {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            hostname: None,
            network_info: None,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Attaches an ASN without a network record.
    pub fn with_asn(self, asn: u32) -> Self {
        self.with_network_info(NetworkInfo::new(asn))
    }

    pub fn with_network(self, asn: u32, network: Network) -> Self {
        self.with_network_info(NetworkInfo::new(asn).with_network(network))
    }

    pub fn with_network_info(mut self, network_info: NetworkInfo) -> Self {
        self.network_info = Some(network_info);
        self
    }
}

impl NetworkInfo {
    pub fn new(asn: u32) -> Self {
        Self { asn, network: None }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn organization_id(&self) -> Option<u64> {
        self.network.as_ref().map(|network| network.organization.id)
    }
}

impl Network {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        organization: Organization,
        network_type: NetworkType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            organization,
            network_type,
        }
    }
}

impl Organization {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
