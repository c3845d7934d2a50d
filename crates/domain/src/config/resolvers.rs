use serde::{Deserialize, Serialize};

use super::health::HealthThresholdConfig;

pub const PUBLIC_DNS_LIST_URL: &str = "https://public-dns.info/nameservers-all.csv";

/// Resolver pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolversConfig {
    /// Attempts per query before the result is treated as indeterminate (default: 50)
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Per-attempt timeout for the trusted pool in milliseconds (default: 3000)
    #[serde(default = "default_trusted_timeout")]
    pub trusted_timeout_ms: u64,

    /// Per-attempt timeout for the untrusted pool in milliseconds (default: 5000)
    #[serde(default = "default_untrusted_timeout")]
    pub untrusted_timeout_ms: u64,

    /// CSV list of public resolvers with `ip_address` and `reliability` columns
    #[serde(default = "default_public_list_url")]
    pub public_list_url: String,

    /// Timeout for fetching the public resolver list in seconds (default: 30)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Minimum reliability score for a public resolver (default: 0.85)
    #[serde(default = "default_min_reliability")]
    pub min_reliability: f64,

    /// Queries per second allowed against each public resolver (default: 5)
    #[serde(default = "default_public_qps")]
    pub public_qps: u32,

    /// Resolver used to probe domains for wildcard behavior (default: "8.8.8.8")
    #[serde(default = "default_detection_resolver")]
    pub detection_resolver: String,

    /// Queries per second allowed against the detection resolver (default: 50)
    #[serde(default = "default_detection_qps")]
    pub detection_qps: u32,

    /// Drop public resolvers that forward the client subnet (default: true)
    #[serde(default = "default_client_subnet_check")]
    pub client_subnet_check: bool,

    #[serde(default)]
    pub health: HealthThresholdConfig,
}

impl Default for ResolversConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            trusted_timeout_ms: default_trusted_timeout(),
            untrusted_timeout_ms: default_untrusted_timeout(),
            public_list_url: default_public_list_url(),
            fetch_timeout_secs: default_fetch_timeout(),
            min_reliability: default_min_reliability(),
            public_qps: default_public_qps(),
            detection_resolver: default_detection_resolver(),
            detection_qps: default_detection_qps(),
            client_subnet_check: default_client_subnet_check(),
            health: HealthThresholdConfig::default(),
        }
    }
}

fn default_attempts() -> u32 {
    50
}

fn default_trusted_timeout() -> u64 {
    3000
}

fn default_untrusted_timeout() -> u64 {
    5000
}

fn default_public_list_url() -> String {
    PUBLIC_DNS_LIST_URL.to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_min_reliability() -> f64 {
    0.85
}

fn default_public_qps() -> u32 {
    5
}

fn default_detection_resolver() -> String {
    "8.8.8.8".to_string()
}

fn default_detection_qps() -> u32 {
    50
}

fn default_client_subnet_check() -> bool {
    true
}
