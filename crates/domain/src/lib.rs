//! dnsprobe Domain Layer
pub mod answer;
pub mod asset;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolver_endpoint;

pub use answer::{answers_by_type, normalize, ExtractedAnswer, QueryResponse};
pub use asset::FqdnAsset;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::{reverse_name, DnsQuestion};
pub use dns_record::{RecordType, ResponseCode};
pub use errors::DomainError;
pub use resolver_endpoint::{parse_resolver_addr, ResolverEndpoint, DEFAULT_DNS_PORT};
