use crate::ports::ResolverPool;
use crate::services::WildcardFilter;
use dnsprobe_domain::{
    answers_by_type, normalize, DnsQuestion, DomainError, ExtractedAnswer, QueryResponse,
    RecordType, ResponseCode,
};
use tracing::{debug, instrument};

pub const DEFAULT_ATTEMPTS: u32 = 50;

/// Classification of a single exchange with a resolver pool.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Transport or exchange failure, or a server-side error code: try again.
    Retry,
    /// A response with at least one record.
    Success(QueryResponse),
    /// A definitive answer that no further attempt can change.
    Failure(DomainError),
}

impl AttemptOutcome {
    pub fn classify(result: Result<QueryResponse, DomainError>) -> Self {
        match result {
            Err(e) if e.is_definitive() => Self::Failure(e),
            Err(_) => Self::Retry,
            Ok(resp) => match resp.rcode {
                ResponseCode::NXDomain => Self::Failure(DomainError::NameDoesNotExist),
                ResponseCode::NoError if resp.answers.is_empty() => {
                    Self::Failure(DomainError::NoRecordOfType)
                }
                ResponseCode::NoError => Self::Success(resp),
                _ => Self::Retry,
            },
        }
    }
}

/// Issues queries against a pool with a bounded retry budget.
///
/// Shared by the trusted and untrusted paths; holds no per-pool state.
pub struct QueryEngine {
    attempts: u32,
    filter: WildcardFilter,
}

impl QueryEngine {
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            filter: WildcardFilter::new(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Resolves `name` for `record_type` through `pool`.
    ///
    /// * `Err(NameDoesNotExist)` / `Err(NoRecordOfType)`: definitive negatives.
    /// * `Ok(vec![])`: indeterminate, wildcard-suppressed, or no record of the
    ///   requested type among the answers.
    /// * `Ok(answers)`: normalized answers of the requested type.
    #[instrument(skip(self, pool), fields(pool = pool.name()))]
    pub async fn query(
        &self,
        pool: &dyn ResolverPool,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ExtractedAnswer>, DomainError> {
        let question = DnsQuestion::for_lookup(name, record_type);

        let Some(response) = self.exchange_with_retries(pool, &question).await? else {
            return Ok(Vec::new());
        };

        if self.filter.is_wildcard(pool, &response).await {
            return Ok(Vec::new());
        }

        let matching = answers_by_type(&response.answers, record_type);
        Ok(normalize(&matching))
    }

    /// Runs the retry loop. `Ok(None)` means no definitive answer: the budget
    /// ran out, or the question cannot be encoded at all.
    pub async fn exchange_with_retries(
        &self,
        pool: &dyn ResolverPool,
        question: &DnsQuestion,
    ) -> Result<Option<QueryResponse>, DomainError> {
        for attempt in 1..=self.attempts {
            let result = pool.exchange(question).await;
            if let Err(DomainError::InvalidDomainName(reason)) = &result {
                debug!(
                    name = %question.name,
                    record_type = %question.record_type,
                    reason = %reason,
                    "Question cannot be encoded, result indeterminate"
                );
                return Ok(None);
            }

            match AttemptOutcome::classify(result) {
                AttemptOutcome::Retry => continue,
                AttemptOutcome::Success(response) => {
                    debug!(
                        name = %question.name,
                        record_type = %question.record_type,
                        attempt,
                        answers = response.answers.len(),
                        "Query answered"
                    );
                    return Ok(Some(response));
                }
                AttemptOutcome::Failure(e) => {
                    debug!(
                        name = %question.name,
                        record_type = %question.record_type,
                        attempt,
                        error = %e,
                        "Query failed definitively"
                    );
                    return Err(e);
                }
            }
        }

        debug!(
            name = %question.name,
            record_type = %question.record_type,
            attempts = self.attempts,
            "Attempt budget exhausted"
        );
        Ok(None)
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS)
    }
}
