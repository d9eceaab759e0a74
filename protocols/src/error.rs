use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("could not build query for {0}")]
    Build(String),
    #[error("malformed dns message: {0}")]
    Malformed(#[from] dns_parser::Error),
    #[error("response id {got} does not match query id {expected}")]
    IdMismatch { expected: u16, got: u16 },
    #[error("received a query where a response was expected")]
    NotAResponse,
    #[error("resolver answered with {0}")]
    Rcode(String),
    #[error("message of {0} bytes does not fit a stream frame")]
    Oversize(usize),
}
