use crate::dns::forwarding::{MessageBuilder, ParsedResponse, ResponseParser};
use crate::dns::transport::Transport;
use dnsprobe_domain::{DnsQuestion, DomainError, QueryResponse};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sends one question to one server over UDP, retrying over TCP when the
/// answer comes back truncated.
pub async fn query_endpoint(
    server: SocketAddr,
    question: &DnsQuestion,
    timeout: Duration,
) -> Result<QueryResponse, DomainError> {
    let start = Instant::now();
    let (id, query_bytes) = MessageBuilder::build_query(question)?;

    let udp_response = Transport::udp(server).send(&query_bytes, timeout).await?;
    let parsed = parse_matching(&udp_response.bytes, id)?;

    if !parsed.truncated {
        return Ok(parsed.response);
    }

    debug!(server = %server, "Response truncated (TC bit), retrying via TCP");

    let remaining = timeout
        .checked_sub(start.elapsed())
        .unwrap_or(Duration::from_millis(500));
    let tcp_response = Transport::tcp(server).send(&query_bytes, remaining).await?;
    Ok(parse_matching(&tcp_response.bytes, id)?.response)
}

fn parse_matching(bytes: &[u8], id: u16) -> Result<ParsedResponse, DomainError> {
    let parsed = ResponseParser::parse(bytes)?;
    if parsed.id != id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "Response ID {} does not match query ID {}",
            parsed.id, id
        )));
    }
    Ok(parsed)
}
