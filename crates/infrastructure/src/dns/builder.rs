use super::catalog::{catalog_ips, trusted_endpoints};
use super::client_subnet::without_subnet_leakers;
use super::pool::{HealthThreshold, UpstreamPool};
use super::public_list::untrusted_endpoints;
use super::rate_tracker::RateTracker;
use dnsprobe_application::ports::ResolverPool;
use dnsprobe_application::use_cases::QueryEngine;
use dnsprobe_application::ResolverContext;
use dnsprobe_domain::config::ResolversConfig;
use dnsprobe_domain::{Config, DomainError, ResolverEndpoint};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const TRUSTED_POOL: &str = "trusted";
pub const UNTRUSTED_POOL: &str = "untrusted";

/// Assembles both resolver pools around one shared rate tracker and wraps
/// them in a [`ResolverContext`].
pub struct ContextBuilder {
    config: ResolversConfig,
    guessing: bool,
    tracker: Arc<RateTracker>,
    client: Option<reqwest::Client>,
    trusted: Option<Vec<ResolverEndpoint>>,
    untrusted: Option<Vec<ResolverEndpoint>>,
}

impl ContextBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.resolvers.clone(),
            guessing: config.guess.enabled,
            tracker: Arc::new(RateTracker::new()),
            client: None,
            trusted: None,
            untrusted: None,
        }
    }

    pub fn with_tracker(mut self, tracker: Arc<RateTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Replaces the built-in catalog.
    pub fn with_trusted_endpoints(mut self, endpoints: Vec<ResolverEndpoint>) -> Self {
        self.trusted = Some(endpoints);
        self
    }

    /// Uses these endpoints instead of downloading the public list.
    pub fn with_untrusted_endpoints(mut self, endpoints: Vec<ResolverEndpoint>) -> Self {
        self.untrusted = Some(endpoints);
        self
    }

    pub fn tracker(&self) -> Arc<RateTracker> {
        Arc::clone(&self.tracker)
    }

    fn detection_resolver(&self) -> Result<ResolverEndpoint, DomainError> {
        ResolverEndpoint::parse(&self.config.detection_resolver, self.config.detection_qps)
    }

    pub fn build_trusted_pool(&self) -> Result<UpstreamPool, DomainError> {
        let endpoints = match &self.trusted {
            Some(endpoints) => {
                let mut endpoints = endpoints.clone();
                fastrand::shuffle(&mut endpoints);
                endpoints
            }
            None => trusted_endpoints()?,
        };

        UpstreamPool::builder(TRUSTED_POOL, self.tracker())
            .with_endpoints(endpoints)
            .with_timeout(Duration::from_millis(self.config.trusted_timeout_ms))
            .with_detection_resolver(self.detection_resolver()?)
            .build()
    }

    /// `None` when the public list cannot be obtained or yields nothing.
    ///
    /// Every source is screened: catalog addresses and the trusted endpoints
    /// never enter the untrusted pool, and subnet-leaking resolvers are
    /// dropped when the check is enabled.
    pub async fn build_untrusted_pool(&self) -> Option<UpstreamPool> {
        let endpoints = match &self.untrusted {
            Some(endpoints) => endpoints.clone(),
            None => match self.fetch_untrusted().await {
                Ok(endpoints) => endpoints,
                Err(e) => {
                    warn!(error = %e, "Untrusted pool unavailable");
                    return None;
                }
            },
        };

        let mut endpoints = self.without_trusted(endpoints);
        if self.config.client_subnet_check && !endpoints.is_empty() {
            endpoints = without_subnet_leakers(
                endpoints,
                Duration::from_millis(self.config.untrusted_timeout_ms),
            )
            .await;
        }

        if endpoints.is_empty() {
            warn!("Public resolver list produced no usable resolvers, untrusted pool unavailable");
            return None;
        }

        let detection = match self.detection_resolver() {
            Ok(detection) => detection,
            Err(e) => {
                warn!(error = %e, "Invalid detection resolver, untrusted pool unavailable");
                return None;
            }
        };

        UpstreamPool::builder(UNTRUSTED_POOL, self.tracker())
            .with_endpoints(endpoints)
            .with_timeout(Duration::from_millis(self.config.untrusted_timeout_ms))
            .with_detection_resolver(detection)
            .with_health(HealthThreshold::from_config(&self.config.health))
            .build()
            .inspect_err(|e| warn!(error = %e, "Untrusted pool unavailable"))
            .ok()
    }

    /// Removes catalog IPs and the exact trusted endpoint addresses.
    fn without_trusted(&self, endpoints: Vec<ResolverEndpoint>) -> Vec<ResolverEndpoint> {
        let catalog: HashSet<IpAddr> = catalog_ips();
        let trusted: HashSet<SocketAddr> = self
            .trusted
            .iter()
            .flatten()
            .map(|endpoint| endpoint.addr)
            .collect();

        let before = endpoints.len();
        let kept: Vec<ResolverEndpoint> = endpoints
            .into_iter()
            .filter(|endpoint| !catalog.contains(&endpoint.ip()) && !trusted.contains(&endpoint.addr))
            .collect();

        if kept.len() < before {
            debug!(excluded = before - kept.len(), "Trusted resolvers excluded from untrusted pool");
        }
        kept
    }

    async fn fetch_untrusted(&self) -> Result<Vec<ResolverEndpoint>, DomainError> {
        let client = match &self.client {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| DomainError::ResolverListUnavailable(e.to_string()))?,
        };

        untrusted_endpoints(
            &client,
            &self.config.public_list_url,
            Duration::from_secs(self.config.fetch_timeout_secs),
            self.config.min_reliability,
            self.config.public_qps,
        )
        .await
    }

    pub async fn build(self, shutdown: CancellationToken) -> Result<ResolverContext, DomainError> {
        let trusted: Arc<dyn ResolverPool> = Arc::new(self.build_trusted_pool()?);
        let untrusted = self
            .build_untrusted_pool()
            .await
            .map(|pool| Arc::new(pool) as Arc<dyn ResolverPool>);

        info!(
            trusted = trusted.len(),
            untrusted = untrusted.as_ref().map_or(0, |p| p.len()),
            tracked_endpoints = self.tracker.len(),
            "Resolver context built"
        );

        let engine = Arc::new(QueryEngine::new(self.config.attempts));
        let context = ResolverContext::new(engine, trusted, untrusted);

        Ok(if self.guessing {
            context.with_guessing(shutdown)
        } else {
            context
        })
    }
}
