use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Name does not exist")]
    NameDoesNotExist,

    #[error("No record of this type")]
    NoRecordOfType,

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query to {server} timed out")]
    TransportTimeout { server: SocketAddr },

    #[error("Connection to {server} refused")]
    TransportConnectionRefused { server: SocketAddr },

    #[error("No active resolvers in pool {0}")]
    TransportNoActiveResolvers(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Public resolver list unavailable: {0}")]
    ResolverListUnavailable(String),

    #[error("Resolver pool unavailable: {0}")]
    PoolUnavailable(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

impl DomainError {
    /// Per-attempt failures that the query engine retries silently.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportNoActiveResolvers(_)
                | DomainError::InvalidDnsResponse(_)
                | DomainError::IoError(_)
        )
    }

    /// Definitive answers from the DNS itself: never retried.
    pub fn is_definitive(&self) -> bool {
        matches!(
            self,
            DomainError::NameDoesNotExist | DomainError::NoRecordOfType
        )
    }
}
