use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// One upstream resolver and the number of queries per second it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverEndpoint {
    pub addr: SocketAddr,
    pub qps: u32,
}

impl ResolverEndpoint {
    pub fn new(addr: SocketAddr, qps: u32) -> Self {
        Self { addr, qps }
    }

    /// Parses `IP` or `IP:port`; IPv6 with a port must be bracketed.
    pub fn parse(address: &str, qps: u32) -> Result<Self, DomainError> {
        parse_resolver_addr(address).map(|addr| Self::new(addr, qps))
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// Accepts `1.1.1.1`, `1.1.1.1:5353`, `2606:4700::1111` and `[2606:4700::1111]:53`.
/// A missing port defaults to 53.
pub fn parse_resolver_addr(address: &str) -> Result<SocketAddr, DomainError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidIpAddress("empty address".to_string()));
    }

    if let Ok(addr) = SocketAddr::from_str(trimmed) {
        return Ok(addr);
    }

    let host = trimmed
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(trimmed);

    host.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| DomainError::InvalidIpAddress(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_ipv4_defaults_to_port_53() {
        let ep = ResolverEndpoint::parse("9.9.9.9", 10).unwrap();
        assert_eq!(ep.addr.to_string(), "9.9.9.9:53");
        assert_eq!(ep.qps, 10);
    }

    #[test]
    fn test_bracketed_ipv6_with_port() {
        let addr = parse_resolver_addr("[2620:fe::fe]:5353").unwrap();
        assert_eq!(addr.port(), 5353);
        assert!(addr.is_ipv6());
    }

    #[test]
    fn test_hostname_is_rejected() {
        assert!(parse_resolver_addr("dns.google").is_err());
        assert!(parse_resolver_addr("300.1.1.1").is_err());
    }
}
