//! dnsprobe Infrastructure Layer
//!
//! Wire-level DNS (hickory-proto over UDP/TCP), the resolver pools behind the
//! application's `ResolverPool` port, and acquisition of the resolver lists.
pub mod dns;

pub use dns::{ContextBuilder, RateTracker, SerialWorkQueue, UpstreamPool};
