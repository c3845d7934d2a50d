use serde::{Deserialize, Serialize};

/// Speculative guess pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuessConfig {
    /// Run the guess pipeline when an untrusted pool is available (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
