use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown record type: {0}")]
    InvalidRecordType(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream resolver unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("No A record found for {0}")]
    NoAnswer(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Registry unreachable: {0}")]
    RegistryUnreachable(String),

    #[error("Registry call failed: {0}")]
    RegistryTransport(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
