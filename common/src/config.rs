//! # Run Configuration
//!
//! Settings fixed at process start. A [`Config`] is assembled once by the CLI
//! and then only ever read, so workers share it without locking.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::error::ConfigError;

pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_DNS_PORT: u16 = 53;

/// How queries reach an explicitly configured resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transport {
    /// TCP, with the two-byte length prefix DNS uses over streams.
    Tcp,
    /// One UDP datagram out, one back.
    #[default]
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => f.write_str("tcp"),
            Transport::Udp => f.write_str("udp"),
        }
    }
}

/// Which resolver answers the PTR queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverConfig {
    /// Whatever the operating system is configured to use.
    #[default]
    System,
    /// Every query is dialed to this endpoint, ignoring system settings.
    Endpoint { addr: SocketAddr, transport: Transport },
}

impl ResolverConfig {
    pub fn from_parts(resolver: Option<IpAddr>, port: u16, transport: Transport) -> Self {
        match resolver {
            Some(ip) => ResolverConfig::Endpoint {
                addr: SocketAddr::new(ip, port),
                transport,
            },
            None => ResolverConfig::System,
        }
    }
}

impl fmt::Display for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverConfig::System => f.write_str("system resolver"),
            ResolverConfig::Endpoint { addr, transport } => write!(f, "{addr} over {transport}"),
        }
    }
}

/// Shape of each result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `<address>\t<hostname>`
    #[default]
    Pair,
    /// `<hostname>`
    DomainOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of concurrent resolution workers.
    pub workers: usize,
    pub resolver: ResolverConfig,
    pub output: OutputMode,
}

impl Config {
    pub fn new(
        workers: usize,
        resolver: ResolverConfig,
        output: OutputMode,
    ) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(Self {
            workers,
            resolver,
            output,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            resolver: ResolverConfig::System,
            output: OutputMode::Pair,
        }
    }
}
