pub mod builder;
pub mod catalog;
pub mod client_subnet;
pub mod forwarding;
pub mod pool;
pub mod public_list;
pub mod rate_tracker;
pub mod transport;
pub mod wildcard;
pub mod work_queue;

pub use builder::ContextBuilder;
pub use pool::{HealthThreshold, UpstreamPool};
pub use rate_tracker::RateTracker;
pub use wildcard::{WildcardDetector, WildcardVerdict};
pub use work_queue::SerialWorkQueue;
