use crate::dns::pool::query_endpoint;
use crate::dns::rate_tracker::RateTracker;
use dashmap::DashMap;
use dnsprobe_domain::{DnsQuestion, QueryResponse, RecordType, ResolverEndpoint, ResponseCode};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const PROBES: usize = 3;
const PROBE_LABEL_LEN: usize = 10;
const PROBE_TYPES: [RecordType; 3] = [RecordType::A, RecordType::AAAA, RecordType::CNAME];

/// What probing a registrable domain with random names revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardVerdict {
    pub wildcard: bool,
    /// Probes got different answers, so any answer may be synthesized.
    pub dynamic: bool,
    pub answers: BTreeSet<String>,
}

impl WildcardVerdict {
    pub fn from_probes(probes: Vec<BTreeSet<String>>) -> Self {
        let answered: Vec<_> = probes.into_iter().filter(|p| !p.is_empty()).collect();
        if answered.is_empty() {
            return Self::default();
        }

        let dynamic = answered.windows(2).any(|w| w[0] != w[1]);
        let answers = answered.into_iter().flatten().collect();
        Self {
            wildcard: true,
            dynamic,
            answers,
        }
    }

    /// Whether `response` could have come from the wildcard.
    pub fn explains(&self, response: &QueryResponse) -> bool {
        if !self.wildcard {
            return false;
        }
        if self.dynamic {
            return true;
        }
        response
            .answers
            .iter()
            .any(|a| self.answers.contains(&a.data.to_lowercase()))
    }
}

/// Probes each registrable domain once through the detection resolver and
/// remembers the verdict.
pub struct WildcardDetector {
    resolver: ResolverEndpoint,
    tracker: Arc<RateTracker>,
    timeout: Duration,
    verdicts: DashMap<String, Arc<OnceCell<WildcardVerdict>>>,
}

impl WildcardDetector {
    pub fn new(resolver: ResolverEndpoint, tracker: Arc<RateTracker>, timeout: Duration) -> Self {
        tracker.register(resolver.addr, resolver.qps);
        Self {
            resolver,
            tracker,
            timeout,
            verdicts: DashMap::new(),
        }
    }

    pub async fn detect(&self, response: &QueryResponse, domain: &str) -> bool {
        self.verdict(domain).await.explains(response)
    }

    /// Cached verdict for `domain`; concurrent callers share one probe run.
    pub async fn verdict(&self, domain: &str) -> WildcardVerdict {
        let domain = domain.to_lowercase();
        let cell = self.verdicts.entry(domain.clone()).or_default().clone();
        cell.get_or_init(|| self.probe(&domain)).await.clone()
    }

    async fn probe(&self, domain: &str) -> WildcardVerdict {
        let mut probes = Vec::with_capacity(PROBES);
        for _ in 0..PROBES {
            let name = format!("{}.{}", random_label(), domain);
            let mut answers = BTreeSet::new();

            for record_type in PROBE_TYPES {
                let question = DnsQuestion::new(name.as_str(), record_type);
                self.tracker.acquire(self.resolver.addr).await;

                match query_endpoint(self.resolver.addr, &question, self.timeout).await {
                    Ok(response) if response.rcode == ResponseCode::NoError => {
                        answers.extend(response.answers.iter().map(|a| a.data.to_lowercase()));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!(name = %name, record_type = %record_type, error = %e, "Wildcard probe failed");
                    }
                }
            }
            probes.push(answers);
        }

        let verdict = WildcardVerdict::from_probes(probes);
        if verdict.wildcard {
            info!(
                domain,
                dynamic = verdict.dynamic,
                answers = verdict.answers.len(),
                "Wildcard detected"
            );
        }
        verdict
    }
}

fn random_label() -> String {
    (0..PROBE_LABEL_LEN).map(|_| fastrand::lowercase()).collect()
}
