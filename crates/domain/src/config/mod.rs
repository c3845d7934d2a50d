//! Configuration module for dnsprobe
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `resolvers`: Resolver pools, retry budget and public list acquisition
//! - `health`: Health threshold for the untrusted pool
//! - `guess`: Speculative guess pipeline
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod guess;
pub mod health;
pub mod logging;
pub mod resolvers;
pub mod root;

pub use errors::ConfigError;
pub use guess::GuessConfig;
pub use health::HealthThresholdConfig;
pub use logging::LoggingConfig;
pub use resolvers::ResolversConfig;
pub use root::{CliOverrides, Config};
