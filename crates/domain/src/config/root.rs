use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::guess::GuessConfig;
use super::logging::LoggingConfig;
use super::resolvers::ResolversConfig;
use crate::resolver_endpoint::parse_resolver_addr;

/// Root configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub resolvers: ResolversConfig,

    #[serde(default)]
    pub guess: GuessConfig,
}

/// Values given on the command line that win over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub public_list_url: Option<String>,
    pub disable_guessing: bool,
}

impl Config {
    /// Loads the config file if one is given, otherwise starts from defaults,
    /// then applies CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                Self::from_toml(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_string(),
                    source,
                })?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(url) = overrides.public_list_url {
            self.resolvers.public_list_url = url;
        }
        if overrides.disable_guessing {
            self.guess.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.resolvers;

        if r.attempts == 0 {
            return Err(ConfigError::Validation(
                "resolvers.attempts must be at least 1".into(),
            ));
        }
        if r.trusted_timeout_ms == 0 || r.untrusted_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "resolver timeouts must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&r.min_reliability) {
            return Err(ConfigError::Validation(format!(
                "resolvers.min_reliability must be within [0, 1], got {}",
                r.min_reliability
            )));
        }
        if r.public_qps == 0 || r.detection_qps == 0 {
            return Err(ConfigError::Validation(
                "queries per second must be greater than zero".into(),
            ));
        }
        if r.health.threshold == 0 {
            return Err(ConfigError::Validation(
                "resolvers.health.threshold must be at least 1".into(),
            ));
        }
        parse_resolver_addr(&r.detection_resolver).map_err(|e| {
            ConfigError::Validation(format!("resolvers.detection_resolver: {}", e))
        })?;

        Ok(())
    }
}
