use std::net::IpAddr;

use crate::trace::{DoneHop, Hop};

/// Deployment identity the narrative is told against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The provider hosting the destination server.
    pub hosting: HostingProvider,
    /// The server every trace ends at.
    pub destination: Destination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingProvider {
    pub asn: u32,
    /// Display name used in the closing paragraph, e.g. "Hetzner".
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub ip: IpAddr,
    pub hostname: String,
}

impl HostingProvider {
    pub const HETZNER_ASN: u32 = 24940;

    pub fn new(asn: u32, name: impl Into<String>) -> Self {
        Self {
            asn,
            name: name.into(),
        }
    }

    pub fn hetzner() -> Self {
        Self::new(Self::HETZNER_ASN, "Hetzner")
    }
}

impl Destination {
    pub fn new(ip: IpAddr, hostname: impl Into<String>) -> Self {
        Self {
            ip,
            hostname: hostname.into(),
        }
    }

    /// Address and reverse name must both match.
    pub fn matches(&self, hop: &DoneHop) -> bool {
        hop.ip == self.ip && hop.hostname.as_deref() == Some(self.hostname.as_str())
    }
}

impl Config {
    pub fn new(hosting: HostingProvider, destination: Destination) -> Self {
        Self {
            hosting,
            destination,
        }
    }

    pub fn is_destination(&self, hop: &Hop) -> bool {
        hop.as_done()
            .is_some_and(|done| self.destination.matches(done))
    }

    /// A hop inside the hosting provider's network that is not the server itself.
    pub fn is_hosting_entrypoint(&self, hop: &Hop) -> bool {
        hop.asn() == Some(self.hosting.asn) && !self.is_destination(hop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn config() -> Config {
        Config::new(
            HostingProvider::hetzner(),
            Destination::new(IpAddr::V4(Ipv4Addr::new(5, 75, 0, 10)), "server.example.org"),
        )
    }

    #[test]
    fn destination_requires_ip_and_hostname() {
        let cfg = config();
        let ip = IpAddr::V4(Ipv4Addr::new(5, 75, 0, 10));

        let exact: Hop = DoneHop::new(ip).with_hostname("server.example.org").into();
        let no_name: Hop = DoneHop::new(ip).into();
        let other_name: Hop = DoneHop::new(ip).with_hostname("static.example.org").into();

        assert!(cfg.is_destination(&exact));
        assert!(!cfg.is_destination(&no_name));
        assert!(!cfg.is_destination(&other_name));
        assert!(!cfg.is_destination(&Hop::Pending));
    }

    #[test]
    fn hosting_entrypoint_excludes_destination() {
        let cfg = config();
        let ip = IpAddr::V4(Ipv4Addr::new(5, 75, 0, 10));

        let entry: Hop = DoneHop::new(IpAddr::V4(Ipv4Addr::new(213, 239, 0, 1)))
            .with_asn(HostingProvider::HETZNER_ASN)
            .into();
        let server: Hop = DoneHop::new(ip)
            .with_hostname("server.example.org")
            .with_asn(HostingProvider::HETZNER_ASN)
            .into();
        let elsewhere: Hop = DoneHop::new(ip).with_asn(3320).into();

        assert!(cfg.is_hosting_entrypoint(&entry));
        assert!(!cfg.is_hosting_entrypoint(&server));
        assert!(!cfg.is_hosting_entrypoint(&elsewhere));
        assert!(!cfg.is_hosting_entrypoint(&Hop::Pending));
    }
}
