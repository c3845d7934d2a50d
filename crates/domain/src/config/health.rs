use serde::{Deserialize, Serialize};

/// Health threshold applied to the untrusted resolver pool
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthThresholdConfig {
    /// Consecutive counted failures before a resolver is retired (default: 20)
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    #[serde(default = "default_true")]
    pub count_timeouts: bool,

    #[serde(default = "default_true")]
    pub count_format_errors: bool,

    #[serde(default = "default_true")]
    pub count_server_failures: bool,

    #[serde(default = "default_true")]
    pub count_not_implemented: bool,

    #[serde(default = "default_true")]
    pub count_query_refusals: bool,
}

impl Default for HealthThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            count_timeouts: true,
            count_format_errors: true,
            count_server_failures: true,
            count_not_implemented: true,
            count_query_refusals: true,
        }
    }
}

fn default_threshold() -> u32 {
    20
}

fn default_true() -> bool {
    true
}
