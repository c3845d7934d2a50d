use crate::ports::ResolverPool;
use crate::use_cases::{GuessPipeline, QueryEngine, RequestContext};
use dnsprobe_domain::{DomainError, ExtractedAnswer, RecordType};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Everything the resolution core needs, built once at startup and passed
/// to whoever issues queries.
pub struct ResolverContext {
    engine: Arc<QueryEngine>,
    trusted: Arc<dyn ResolverPool>,
    untrusted: Option<Arc<dyn ResolverPool>>,
    guessing: Option<GuessPipeline>,
}

impl ResolverContext {
    pub fn new(
        engine: Arc<QueryEngine>,
        trusted: Arc<dyn ResolverPool>,
        untrusted: Option<Arc<dyn ResolverPool>>,
    ) -> Self {
        Self {
            engine,
            trusted,
            untrusted,
            guessing: None,
        }
    }

    /// Starts the guess pipeline on the untrusted pool. Without an untrusted
    /// pool guessing stays disabled.
    pub fn with_guessing(mut self, shutdown: CancellationToken) -> Self {
        match &self.untrusted {
            Some(pool) if !pool.is_empty() => {
                self.guessing = Some(GuessPipeline::start(
                    Arc::clone(&self.engine),
                    Arc::clone(pool),
                    shutdown,
                ));
            }
            _ => debug!("No untrusted pool, guessing disabled"),
        }
        self
    }

    /// Resolves through the trusted pool.
    pub async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ExtractedAnswer>, DomainError> {
        self.engine.query(self.trusted.as_ref(), name, record_type).await
    }

    /// Resolves through the untrusted pool, or returns nothing if there is none.
    pub async fn query_untrusted(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ExtractedAnswer>, DomainError> {
        match &self.untrusted {
            Some(pool) => self.engine.query(pool.as_ref(), name, record_type).await,
            None => {
                debug!(name, record_type = %record_type, "Untrusted pool unavailable");
                Ok(Vec::new())
            }
        }
    }

    /// Queues a speculative guess. Returns `false` when guessing is disabled.
    pub fn submit_guess(&self, request: RequestContext, name: &str) -> bool {
        match &self.guessing {
            Some(pipeline) => {
                pipeline.submit(request, name);
                true
            }
            None => {
                debug!(name, "Guessing disabled, candidate ignored");
                false
            }
        }
    }

    /// Waits until every queued guess has run or been dropped.
    pub async fn wait_for_guesses(&self) {
        if let Some(pipeline) = &self.guessing {
            pipeline.wait_idle().await;
        }
    }

    pub fn guessing_enabled(&self) -> bool {
        self.guessing.is_some()
    }

    pub fn trusted_count(&self) -> usize {
        self.trusted.len()
    }

    pub fn untrusted_count(&self) -> usize {
        self.untrusted.as_ref().map_or(0, |p| p.len())
    }
}
