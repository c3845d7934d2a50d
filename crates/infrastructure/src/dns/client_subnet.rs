//! Screens public resolvers that forward the client's subnet (EDNS Client
//! Subnet) to authoritative servers.
//!
//! `o-o.myaddr.l.google.com` answers TXT queries with the address that asked
//! and, when the query carried an ECS option, an `edns0-client-subnet` string.
//! A resolver whose answer contains that string is attaching our subnet.

use super::pool::query_endpoint;
use dnsprobe_domain::{DnsQuestion, QueryResponse, RecordType, ResolverEndpoint};
use futures::stream::{self, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, info};

pub const CLIENT_SUBNET_CHECK_NAME: &str = "o-o.myaddr.l.google.com";
const CLIENT_SUBNET_MARKER: &str = "edns0-client-subnet";
const CHECK_CONCURRENCY: usize = 64;

pub fn reveals_client_subnet(response: &QueryResponse) -> bool {
    response.answers.iter().any(|a| {
        a.record_type == RecordType::TXT
            && a.data.to_ascii_lowercase().contains(CLIENT_SUBNET_MARKER)
    })
}

/// `false` when the resolver could not be checked.
pub async fn leaks_client_subnet(server: SocketAddr, timeout: Duration) -> bool {
    let question = DnsQuestion::new(CLIENT_SUBNET_CHECK_NAME, RecordType::TXT);
    match query_endpoint(server, &question, timeout).await {
        Ok(response) => reveals_client_subnet(&response),
        Err(e) => {
            debug!(server = %server, error = %e, "Client subnet check failed");
            false
        }
    }
}

/// Drops every endpoint that leaks the client subnet, keeping input order.
pub async fn without_subnet_leakers(
    endpoints: Vec<ResolverEndpoint>,
    timeout: Duration,
) -> Vec<ResolverEndpoint> {
    let total = endpoints.len();
    let kept: Vec<ResolverEndpoint> = stream::iter(endpoints)
        .map(|endpoint| async move {
            let leaks = leaks_client_subnet(endpoint.addr, timeout).await;
            (endpoint, leaks)
        })
        .buffered(CHECK_CONCURRENCY)
        .filter_map(|(endpoint, leaks)| async move { (!leaks).then_some(endpoint) })
        .collect()
        .await;

    info!(
        checked = total,
        dropped = total - kept.len(),
        "Client subnet check complete"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsprobe_domain::{ExtractedAnswer, ResponseCode};

    fn txt(data: &str) -> QueryResponse {
        QueryResponse::new(
            CLIENT_SUBNET_CHECK_NAME,
            ResponseCode::NoError,
            vec![ExtractedAnswer::new(CLIENT_SUBNET_CHECK_NAME, RecordType::TXT, data)],
        )
    }

    #[test]
    fn test_subnet_string_is_a_leak() {
        assert!(reveals_client_subnet(&txt("edns0-client-subnet 198.51.100.0/24")));
    }

    #[test]
    fn test_plain_address_is_not_a_leak() {
        assert!(!reveals_client_subnet(&txt("198.51.100.23")));
    }

    #[test]
    fn test_non_txt_answers_are_ignored() {
        let response = QueryResponse::new(
            CLIENT_SUBNET_CHECK_NAME,
            ResponseCode::NoError,
            vec![ExtractedAnswer::new(
                CLIENT_SUBNET_CHECK_NAME,
                RecordType::CNAME,
                "edns0-client-subnet.example.net",
            )],
        );
        assert!(!reveals_client_subnet(&response));
    }
}
