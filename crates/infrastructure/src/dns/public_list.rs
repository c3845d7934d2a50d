//! Acquisition of the public resolver list backing the untrusted pool.

use crate::dns::catalog::catalog_ips;
use dnsprobe_domain::{parse_resolver_addr, DomainError, ResolverEndpoint};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, info, warn};

const IP_COLUMN: &str = "ip_address";
const RELIABILITY_COLUMN: &str = "reliability";

/// Extracts qualifying resolver addresses from the CSV body.
///
/// Columns are located by header name. A row qualifies when its reliability
/// parses as a number no lower than `min_reliability`. Addresses are
/// validated as IP literals (port 53 unless given), deduplicated in order of
/// first appearance, and dropped when their IP is in `exclude`.
pub fn parse_public_resolvers(
    body: &str,
    min_reliability: f64,
    exclude: &HashSet<IpAddr>,
) -> Vec<SocketAddr> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let (ip_idx, rel_idx) = match reader.headers() {
        Ok(headers) => (
            headers.iter().position(|h| h == IP_COLUMN),
            headers.iter().position(|h| h == RELIABILITY_COLUMN),
        ),
        Err(e) => {
            warn!(error = %e, "Unreadable resolver list header");
            return Vec::new();
        }
    };
    let (Some(ip_idx), Some(rel_idx)) = (ip_idx, rel_idx) else {
        warn!("Resolver list is missing the ip_address or reliability column");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut resolvers = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };
        let (Some(address), Some(reliability)) = (record.get(ip_idx), record.get(rel_idx)) else {
            skipped += 1;
            continue;
        };
        let Ok(reliability) = reliability.parse::<f64>() else {
            skipped += 1;
            continue;
        };
        if reliability < min_reliability || reliability.is_nan() {
            continue;
        }

        let addr = match parse_resolver_addr(address) {
            Ok(addr) => addr,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if exclude.contains(&addr.ip()) {
            continue;
        }
        if seen.insert(addr) {
            resolvers.push(addr);
        }
    }

    debug!(qualified = resolvers.len(), skipped, "Resolver list parsed");
    resolvers
}

/// Downloads the resolver list. Any 2xx or 3xx status is accepted.
pub async fn fetch_public_list(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, DomainError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| DomainError::ResolverListUnavailable(format!("fetch error for {}: {}", url, e)))?;

    let status = response.status();
    if !(status.is_success() || status.is_redirection()) {
        return Err(DomainError::ResolverListUnavailable(format!(
            "HTTP {} for {}",
            status.as_u16(),
            url
        )));
    }

    response
        .text()
        .await
        .map_err(|e| DomainError::ResolverListUnavailable(format!("read error for {}: {}", url, e)))
}

/// Fetches and filters the public list, excluding catalog resolvers.
pub async fn untrusted_endpoints(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    min_reliability: f64,
    qps: u32,
) -> Result<Vec<ResolverEndpoint>, DomainError> {
    let body = fetch_public_list(client, url, timeout).await?;
    let endpoints: Vec<ResolverEndpoint> =
        parse_public_resolvers(&body, min_reliability, &catalog_ips())
            .into_iter()
            .map(|addr| ResolverEndpoint::new(addr, qps))
            .collect();

    info!(url, resolvers = endpoints.len(), "Public resolver list loaded");
    Ok(endpoints)
}
