use async_trait::async_trait;
use dnsprobe_domain::{DomainError, FqdnAsset};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Read-only view of the names a discovery session already knows.
pub trait DiscoveryCache: Send + Sync {
    fn contains_fqdn(&self, name: &str) -> bool;
}

/// Persistent asset graph.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upsert_fqdn(&self, name: &str) -> Result<FqdnAsset, DomainError>;
}

/// External work queue that serializes writes to the asset graph.
///
/// `append` never blocks: the task runs later, on the queue's own worker.
pub trait PersistenceQueue: Send + Sync {
    fn append(&self, task: BoxFuture<'static, ()>);
}

/// A running discovery session, as seen by the resolution core.
pub trait DiscoverySession: Send + Sync {
    fn id(&self) -> &str;

    /// Cooperative cancellation flag, polled before each unit of work.
    fn is_done(&self) -> bool;

    fn cache(&self) -> &dyn DiscoveryCache;

    fn store(&self) -> Arc<dyn AssetStore>;

    fn queue(&self) -> Arc<dyn PersistenceQueue>;
}

/// Hands confirmed assets back to the plugin framework.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        event_name: &str,
        asset: FqdnAsset,
        session: Arc<dyn DiscoverySession>,
    ) -> Result<(), DomainError>;
}
