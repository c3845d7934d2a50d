pub mod discovery;
pub mod resolver_pool;

pub use discovery::{AssetStore, DiscoveryCache, DiscoverySession, EventDispatcher, PersistenceQueue};
pub use resolver_pool::ResolverPool;
