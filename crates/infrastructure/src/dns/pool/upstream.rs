use super::health::HealthThreshold;
use super::query::query_endpoint;
use crate::dns::rate_tracker::RateTracker;
use crate::dns::wildcard::WildcardDetector;
use async_trait::async_trait;
use dnsprobe_application::ports::ResolverPool;
use dnsprobe_domain::{DnsQuestion, DomainError, QueryResponse, ResolverEndpoint};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

struct Upstream {
    endpoint: ResolverEndpoint,
    failures: AtomicU32,
    retired: AtomicBool,
}

impl Upstream {
    fn new(endpoint: ResolverEndpoint) -> Self {
        Self {
            endpoint,
            failures: AtomicU32::new(0),
            retired: AtomicBool::new(false),
        }
    }
}

/// A named set of resolvers queried round-robin under a shared rate tracker.
pub struct UpstreamPool {
    name: Arc<str>,
    upstreams: Vec<Upstream>,
    cursor: AtomicUsize,
    active: AtomicUsize,
    retire_lock: Mutex<()>,
    tracker: Arc<RateTracker>,
    timeout: Duration,
    health: Option<HealthThreshold>,
    wildcard: WildcardDetector,
}

impl UpstreamPool {
    pub fn builder(name: &str, tracker: Arc<RateTracker>) -> UpstreamPoolBuilder {
        UpstreamPoolBuilder::new(name, tracker)
    }

    pub fn endpoints(&self) -> Vec<ResolverEndpoint> {
        self.upstreams
            .iter()
            .filter(|u| !u.retired.load(Ordering::Acquire))
            .map(|u| u.endpoint)
            .collect()
    }

    pub fn is_retired(&self, endpoint: &ResolverEndpoint) -> bool {
        self.upstreams
            .iter()
            .find(|u| u.endpoint.addr == endpoint.addr)
            .is_some_and(|u| u.retired.load(Ordering::Acquire))
    }

    fn next_upstream(&self) -> Option<&Upstream> {
        let n = self.upstreams.len();
        if n == 0 {
            return None;
        }
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % n;
        (0..n)
            .map(|i| &self.upstreams[(start + i) % n])
            .find(|u| !u.retired.load(Ordering::Acquire))
    }

    fn record_outcome(&self, upstream: &Upstream, result: &Result<QueryResponse, DomainError>) {
        let Some(health) = &self.health else {
            return;
        };

        if !health.counts(result) {
            upstream.failures.store(0, Ordering::Release);
            return;
        }

        let failures = upstream.failures.fetch_add(1, Ordering::AcqRel) + 1;
        if failures >= health.threshold() {
            self.retire(upstream, failures);
        }
    }

    fn retire(&self, upstream: &Upstream, failures: u32) {
        let Ok(_guard) = self.retire_lock.lock() else {
            return;
        };

        if upstream.retired.load(Ordering::Acquire) {
            return;
        }
        if self.active.load(Ordering::Acquire) <= 1 {
            debug!(
                pool = %self.name,
                server = %upstream.endpoint,
                "Keeping last active resolver"
            );
            return;
        }

        upstream.retired.store(true, Ordering::Release);
        let remaining = self.active.fetch_sub(1, Ordering::AcqRel) - 1;
        warn!(
            pool = %self.name,
            server = %upstream.endpoint,
            failures,
            remaining,
            "Resolver retired after consecutive failures"
        );
    }
}

#[async_trait]
impl ResolverPool for UpstreamPool {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    async fn exchange(&self, question: &DnsQuestion) -> Result<QueryResponse, DomainError> {
        let upstream = self
            .next_upstream()
            .ok_or_else(|| DomainError::TransportNoActiveResolvers(self.name.to_string()))?;

        self.tracker.acquire(upstream.endpoint.addr).await;
        let result = query_endpoint(upstream.endpoint.addr, question, self.timeout).await;
        self.record_outcome(upstream, &result);

        if let Err(e) = &result {
            debug!(
                pool = %self.name,
                server = %upstream.endpoint,
                name = %question.name,
                error = %e,
                "Exchange failed"
            );
        }
        result
    }

    async fn wildcard_detected(&self, response: &QueryResponse, domain: &str) -> bool {
        self.wildcard.detect(response, domain).await
    }
}

pub struct UpstreamPoolBuilder {
    name: String,
    tracker: Arc<RateTracker>,
    endpoints: Vec<ResolverEndpoint>,
    timeout: Duration,
    detection_resolver: Option<ResolverEndpoint>,
    health: Option<HealthThreshold>,
}

impl UpstreamPoolBuilder {
    pub fn new(name: &str, tracker: Arc<RateTracker>) -> Self {
        Self {
            name: name.to_string(),
            tracker,
            endpoints: Vec::new(),
            timeout: Duration::from_secs(3),
            detection_resolver: None,
            health: None,
        }
    }

    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = ResolverEndpoint>) -> Self {
        self.endpoints.extend(endpoints);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_detection_resolver(mut self, resolver: ResolverEndpoint) -> Self {
        self.detection_resolver = Some(resolver);
        self
    }

    pub fn with_health(mut self, health: HealthThreshold) -> Self {
        self.health = Some(health);
        self
    }

    pub fn build(self) -> Result<UpstreamPool, DomainError> {
        if self.endpoints.is_empty() {
            return Err(DomainError::PoolUnavailable(format!(
                "pool '{}' has no resolvers",
                self.name
            )));
        }
        let detection = self.detection_resolver.unwrap_or(self.endpoints[0]);

        for endpoint in &self.endpoints {
            self.tracker.register(endpoint.addr, endpoint.qps);
        }

        let upstreams: Vec<Upstream> = self.endpoints.into_iter().map(Upstream::new).collect();

        info!(
            pool = %self.name,
            resolvers = upstreams.len(),
            timeout_ms = self.timeout.as_millis() as u64,
            detection = %detection,
            health_threshold = self.health.as_ref().map(|h| h.threshold()),
            "Resolver pool built"
        );

        Ok(UpstreamPool {
            name: Arc::from(self.name),
            active: AtomicUsize::new(upstreams.len()),
            upstreams,
            cursor: AtomicUsize::new(0),
            retire_lock: Mutex::new(()),
            wildcard: WildcardDetector::new(detection, Arc::clone(&self.tracker), self.timeout),
            tracker: self.tracker,
            timeout: self.timeout,
            health: self.health,
        })
    }
}
