pub mod health;
pub mod query;
pub mod upstream;

pub use health::HealthThreshold;
pub use query::query_endpoint;
pub use upstream::{UpstreamPool, UpstreamPoolBuilder};
