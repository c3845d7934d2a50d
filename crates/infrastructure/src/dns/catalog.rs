//! Built-in catalog of well-known public recursive resolvers.
//!
//! These make up the trusted pool. Large anycast operators get a higher
//! per-server allowance than smaller providers.

use dnsprobe_domain::{DomainError, ResolverEndpoint};
use std::collections::HashSet;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy)]
pub struct BaselineResolver {
    pub provider: &'static str,
    pub address: &'static str,
    pub qps: u32,
}

const fn r(provider: &'static str, address: &'static str, qps: u32) -> BaselineResolver {
    BaselineResolver {
        provider,
        address,
        qps,
    }
}

pub const BASELINE_RESOLVERS: &[BaselineResolver] = &[
    r("Google", "8.8.8.8", 20),
    r("Google", "8.8.4.4", 20),
    r("Google", "2001:4860:4860::8888", 20),
    r("Google", "2001:4860:4860::8844", 20),
    r("Gcore", "95.85.95.85", 10),
    r("Gcore", "2.56.220.2", 10),
    r("Gcore", "2a03:90c0:999d::1", 10),
    r("Gcore", "2a03:90c0:9992::1", 10),
    r("ControlD", "76.76.2.0", 10),
    r("ControlD", "76.76.10.0", 10),
    r("Quad9", "9.9.9.9", 10),
    r("Quad9", "149.112.112.112", 10),
    r("Quad9", "2620:fe::fe", 10),
    r("Quad9", "2620:fe::9", 10),
    r("OpenDNS", "208.67.222.222", 10),
    r("OpenDNS", "208.67.220.220", 10),
    r("OpenDNS", "2620:0:ccc::2", 10),
    r("OpenDNS", "2620:0:ccd::2", 10),
    r("Cloudflare", "1.1.1.1", 15),
    r("Cloudflare", "1.0.0.1", 15),
    r("Cloudflare", "2606:4700:4700::1111", 15),
    r("Cloudflare", "2606:4700:4700::1001", 15),
    r("CleanBrowsing", "185.228.168.9", 5),
    r("CleanBrowsing", "185.228.169.9", 5),
    r("Alternate DNS", "76.76.19.19", 5),
    r("Alternate DNS", "76.223.122.150", 5),
    r("Alternate DNS", "2602:fcbc::ad", 5),
    r("Alternate DNS", "2602:fcbc:2::ad", 5),
    r("AdGuard", "94.140.14.14", 5),
    r("AdGuard", "94.140.15.15", 5),
    r("AdGuard", "176.103.130.130", 5),
    r("AdGuard", "176.103.130.131", 5),
    r("AdGuard", "94.140.14.140", 5),
    r("AdGuard", "94.140.14.141", 5),
    r("AdGuard", "2a10:50c0::1:ff", 5),
    r("AdGuard", "2a10:50c0::2:ff", 5),
    r("Comodo", "8.26.56.26", 5),
    r("Comodo", "8.20.247.20", 5),
    r("Lumen", "205.171.3.65", 5),
    r("Lumen", "205.171.2.65", 5),
    r("Lumen", "2001:428::1", 5),
    r("Lumen", "2001:428::2", 5),
    r("Verisign", "64.6.64.6", 5),
    r("Verisign", "64.6.65.6", 5),
    r("Verisign", "2620:74:1b::1:1", 5),
    r("Verisign", "2620:74:1c::2:2", 5),
    r("Level3", "209.244.0.3", 5),
    r("Level3", "209.244.0.4", 5),
    r("CIRA Canadian Shield", "149.112.121.10", 5),
    r("CIRA Canadian Shield", "149.112.122.10", 5),
    r("CIRA Canadian Shield", "2620:10A:80BB::10", 5),
    r("CIRA Canadian Shield", "2620:10A:80BC::10", 5),
    r("OpenNIC", "138.197.140.189", 5),
    r("OpenNIC", "162.243.19.47", 5),
    r("OpenNIC", "216.87.84.211", 5),
    r("OpenNIC", "23.90.4.6", 5),
    r("Oracle Dyn", "216.146.35.35", 5),
    r("Oracle Dyn", "216.146.36.36", 5),
    r("UncensoredDNS", "91.239.100.100", 5),
    r("UncensoredDNS", "89.233.43.71", 5),
    r("UncensoredDNS", "2001:67c:28a4::", 5),
    r("UncensoredDNS", "2a01:3a0:53:53::", 5),
    r("Yandex", "77.88.8.8", 5),
    r("Yandex", "77.88.8.1", 5),
    r("Yandex", "2a02:6b8::feed:0ff", 5),
    r("Yandex", "2a02:6b8:0:1::feed:0ff", 5),
    r("Hurricane Electric", "74.82.42.42", 5),
    r("Hurricane Electric", "2001:470:20::2", 5),
    r("DNS for Family", "94.130.180.225", 5),
    r("DNS for Family", "78.47.64.161", 5),
    r("DNS for Family", "2a01:4f8:1c0c:40db::1", 5),
    r("DNS for Family", "2a01:4f8:1c17:4df8::1", 5),
    r("FlashStart", "185.236.104.104", 5),
    r("FlashStart", "185.236.105.105", 5),
    r("FlashStart", "2a12:7bc0:104:104::", 5),
    r("FlashStart", "2a12:7bc0:105:105::", 5),
    r("Freenom World", "80.80.80.80", 5),
    r("Freenom World", "80.80.81.81", 5),
    r("DNS.WATCH", "84.200.69.80", 5),
    r("DNS.WATCH", "84.200.70.40", 5),
    r("DNS.WATCH", "2001:1608:10:25::1c04:b12f", 5),
    r("DNS.WATCH", "2001:1608:10:25::9249:d69b", 5),
    r("Neustar", "156.154.70.5", 5),
    r("Neustar", "156.157.71.5", 5),
    r("GreenTeamDNS", "81.218.119.11", 5),
    r("GreenTeamDNS", "209.88.198.133", 5),
    r("FreeDNS", "37.235.1.174", 5),
    r("FreeDNS", "37.235.1.177", 5),
    r("CyberGhost", "38.132.106.139", 5),
    r("CyberGhost", "194.187.251.67", 5),
];

/// Catalog entries as endpoints, in a fresh random order on every call.
pub fn trusted_endpoints() -> Result<Vec<ResolverEndpoint>, DomainError> {
    let mut endpoints = BASELINE_RESOLVERS
        .iter()
        .map(|b| ResolverEndpoint::parse(b.address, b.qps))
        .collect::<Result<Vec<_>, _>>()?;
    fastrand::shuffle(&mut endpoints);
    Ok(endpoints)
}

/// Addresses of every catalog entry, for excluding them from the public list.
pub fn catalog_ips() -> HashSet<IpAddr> {
    BASELINE_RESOLVERS
        .iter()
        .filter_map(|b| b.address.parse::<IpAddr>().ok())
        .collect()
}
