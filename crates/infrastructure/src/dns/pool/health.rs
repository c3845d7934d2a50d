use dnsprobe_domain::config::HealthThresholdConfig;
use dnsprobe_domain::{DomainError, QueryResponse, ResponseCode};

/// Decides which exchange outcomes count towards retiring a resolver.
#[derive(Debug, Clone)]
pub struct HealthThreshold {
    threshold: u32,
    count_timeouts: bool,
    count_format_errors: bool,
    count_server_failures: bool,
    count_not_implemented: bool,
    count_query_refusals: bool,
}

impl HealthThreshold {
    pub fn from_config(config: &HealthThresholdConfig) -> Self {
        Self {
            threshold: config.threshold.max(1),
            count_timeouts: config.count_timeouts,
            count_format_errors: config.count_format_errors,
            count_server_failures: config.count_server_failures,
            count_not_implemented: config.count_not_implemented,
            count_query_refusals: config.count_query_refusals,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whether `result` is a failure of one of the enabled kinds.
    pub fn counts(&self, result: &Result<QueryResponse, DomainError>) -> bool {
        match result {
            Err(DomainError::TransportTimeout { .. }) => self.count_timeouts,
            Err(_) => false,
            Ok(response) => match response.rcode {
                ResponseCode::FormErr => self.count_format_errors,
                ResponseCode::ServFail => self.count_server_failures,
                ResponseCode::NotImp => self.count_not_implemented,
                ResponseCode::Refused => self.count_query_refusals,
                _ => false,
            },
        }
    }
}

impl Default for HealthThreshold {
    fn default() -> Self {
        Self::from_config(&HealthThresholdConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(rcode: ResponseCode) -> Result<QueryResponse, DomainError> {
        Ok(QueryResponse::new("example.com", rcode, vec![]))
    }

    #[test]
    fn test_default_counts_all_kinds() {
        let health = HealthThreshold::default();
        assert_eq!(health.threshold(), 20);
        assert!(health.counts(&Err(DomainError::TransportTimeout {
            server: "192.0.2.1:53".parse().unwrap()
        })));
        assert!(health.counts(&response(ResponseCode::FormErr)));
        assert!(health.counts(&response(ResponseCode::ServFail)));
        assert!(health.counts(&response(ResponseCode::NotImp)));
        assert!(health.counts(&response(ResponseCode::Refused)));
    }

    #[test]
    fn test_answers_never_count() {
        let health = HealthThreshold::default();
        assert!(!health.counts(&response(ResponseCode::NoError)));
        assert!(!health.counts(&response(ResponseCode::NXDomain)));
        assert!(!health.counts(&Err(DomainError::IoError("reset".into()))));
    }

    #[test]
    fn test_disabled_kind_is_ignored() {
        let config = HealthThresholdConfig {
            count_query_refusals: false,
            ..Default::default()
        };
        let health = HealthThreshold::from_config(&config);
        assert!(!health.counts(&response(ResponseCode::Refused)));
        assert!(health.counts(&response(ResponseCode::ServFail)));
    }
}
