use thiserror::Error;

/// Why a line of input could not be read as a CIDR block.
///
/// Every variant carries the offending input so the message stands on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("invalid CIDR address: {0}")]
    MissingPrefix(String),
    #[error("invalid CIDR address: {input} (bad address {addr:?})")]
    InvalidAddress { input: String, addr: String },
    #[error("invalid CIDR address: {input} (bad prefix length {prefix:?})")]
    InvalidPrefix { input: String, prefix: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,
}
