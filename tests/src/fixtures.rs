use std::net::{IpAddr, Ipv4Addr};

use hoptale_common::config::{Config, Destination, HostingProvider};
use hoptale_common::trace::{DoneHop, Hop, Network, NetworkType, Organization};

pub const SERVER_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(5, 75, 0, 10));
pub const SERVER_HOST: &str = "server.example.org";

pub fn config() -> Config {
    Config::new(
        HostingProvider::hetzner(),
        Destination::new(SERVER_IP, SERVER_HOST),
    )
}

pub fn ip(a: u8, b: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(198, 18, a, b))
}

/// A hop carrying a full network record, organization named like the network.
pub fn network_hop(addr: IpAddr, asn: u32, name: &str, network_type: NetworkType) -> DoneHop {
    let network = Network::new(
        u64::from(asn),
        name,
        Organization::new(u64::from(asn), name),
        network_type,
    );
    DoneHop::new(addr).with_network(asn, network)
}

pub fn isp(addr: IpAddr, asn: u32, name: &str) -> Hop {
    network_hop(addr, asn, name, NetworkType::Isp).into()
}

pub fn nsp(addr: IpAddr, asn: u32, name: &str) -> Hop {
    network_hop(addr, asn, name, NetworkType::Nsp).into()
}

pub fn asn_only(addr: IpAddr, asn: u32) -> Hop {
    DoneHop::new(addr).with_asn(asn).into()
}

pub fn hosting(last_octet: u8) -> DoneHop {
    DoneHop::new(IpAddr::V4(Ipv4Addr::new(213, 239, 0, last_octet)))
        .with_asn(HostingProvider::HETZNER_ASN)
}

pub fn server() -> Hop {
    DoneHop::new(SERVER_IP)
        .with_hostname(SERVER_HOST)
        .with_asn(HostingProvider::HETZNER_ASN)
        .into()
}

pub fn pending() -> Hop {
    Hop::Pending
}
