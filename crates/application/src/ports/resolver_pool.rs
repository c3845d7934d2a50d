use async_trait::async_trait;
use dnsprobe_domain::{DnsQuestion, DomainError, QueryResponse};

/// Application-layer port for a set of upstream resolvers.
///
/// The implementation lives in the infrastructure layer: it owns the
/// endpoints, the shared rate tracker, the per-attempt timeout and the
/// wildcard detection endpoint.
#[async_trait]
pub trait ResolverPool: Send + Sync {
    /// Pool name for logging ("trusted", "untrusted").
    fn name(&self) -> &str;

    /// Number of resolvers currently able to take queries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sends one question to one resolver and waits for its parsed response.
    ///
    /// Transport failures (timeouts, malformed packets, network errors) are
    /// returned as errors for which `DomainError::is_transport_error` holds.
    /// Any DNS response, including NXDOMAIN, is `Ok`.
    async fn exchange(&self, question: &DnsQuestion) -> Result<QueryResponse, DomainError>;

    /// Whether `response` is explained by wildcard behavior of `domain`,
    /// the registrable domain of the question.
    async fn wildcard_detected(&self, response: &QueryResponse, domain: &str) -> bool;
}
