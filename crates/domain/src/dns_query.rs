use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// A single DNS question as sent to a resolver pool.
/// Uses `Arc<str>` so retries can clone it freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }

    /// Builds the question form for `record_type`: a reverse lookup for PTR,
    /// a forward lookup otherwise.
    ///
    /// A PTR question whose name is an IP literal is rewritten into its
    /// `in-addr.arpa` / `ip6.arpa` form; any other PTR name is taken as given.
    pub fn for_lookup(name: &str, record_type: RecordType) -> Self {
        let name = name.trim().trim_end_matches('.');
        if record_type == RecordType::PTR {
            if let Ok(ip) = name.parse::<IpAddr>() {
                return Self::new(reverse_name(&ip), RecordType::PTR);
            }
        }
        Self::new(name, record_type)
    }

    pub fn is_reverse(&self) -> bool {
        self.record_type == RecordType::PTR
            && (self.name.ends_with(".in-addr.arpa") || self.name.ends_with(".ip6.arpa"))
    }
}

/// Reverse lookup name for an address (RFC 1035 §3.5, RFC 3596 §2.5).
pub fn reverse_name(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}
