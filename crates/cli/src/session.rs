//! In-process discovery session for the `guess` command.

use async_trait::async_trait;
use dashmap::DashMap;
use dnsprobe_application::ports::{
    AssetStore, DiscoveryCache, DiscoverySession, EventDispatcher, PersistenceQueue,
};
use dnsprobe_domain::{DomainError, FqdnAsset};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Asset store kept in memory; doubles as the session's cache.
#[derive(Default)]
pub struct InMemoryAssetStore {
    assets: DashMap<String, FqdnAsset>,
    next_id: AtomicU64,
}

impl InMemoryAssetStore {
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.assets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl DiscoveryCache for InMemoryAssetStore {
    fn contains_fqdn(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn upsert_fqdn(&self, name: &str) -> Result<FqdnAsset, DomainError> {
        let asset = self
            .assets
            .entry(name.to_string())
            .or_insert_with(|| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                FqdnAsset::new(format!("fqdn-{id}"), name)
            })
            .clone();
        Ok(asset)
    }
}

pub struct InMemorySession {
    id: String,
    shutdown: CancellationToken,
    store: Arc<InMemoryAssetStore>,
    queue: Arc<dyn PersistenceQueue>,
}

impl InMemorySession {
    pub fn new(
        id: &str,
        shutdown: CancellationToken,
        store: Arc<InMemoryAssetStore>,
        queue: Arc<dyn PersistenceQueue>,
    ) -> Self {
        Self {
            id: id.to_string(),
            shutdown,
            store,
            queue,
        }
    }
}

impl DiscoverySession for InMemorySession {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_done(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn cache(&self) -> &dyn DiscoveryCache {
        self.store.as_ref()
    }

    fn store(&self) -> Arc<dyn AssetStore> {
        self.store.clone()
    }

    fn queue(&self) -> Arc<dyn PersistenceQueue> {
        Arc::clone(&self.queue)
    }
}

/// Logs each discovered asset instead of handing it to plugins.
pub struct LoggingDispatcher;

#[async_trait]
impl EventDispatcher for LoggingDispatcher {
    async fn dispatch(
        &self,
        event_name: &str,
        asset: FqdnAsset,
        session: Arc<dyn DiscoverySession>,
    ) -> Result<(), DomainError> {
        info!(
            event = event_name,
            asset_id = %asset.id,
            fqdn = %asset.name,
            session = session.id(),
            "FQDN discovered"
        );
        Ok(())
    }
}
