//! # Reverse Lookup
//!
//! The seam between the pool and DNS. Workers only ever see a
//! [`ReverseLookup`]; which implementation sits behind it is chosen once, at
//! startup, from the [`ResolverConfig`].
//!
//! * [`SystemResolver`] asks the nameservers the host is configured with.
//! * [`EndpointResolver`] speaks DNS itself to a configured server, through an
//!   injected [`Dialer`](crate::network::dial::Dialer).

use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::ResolveError;
use ptrsweep_common::config::ResolverConfig;
use ptrsweep_protocols::error::ProtocolError;
use thiserror::Error;
use tracing::debug;

use crate::network::dial::EndpointDialer;

mod endpoint;
mod system;

pub use endpoint::EndpointResolver;
pub use system::SystemResolver;

/// Deadline for one query/response exchange with an explicit endpoint.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("resolver connection failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("no reply for {0} before the deadline")]
    Timeout(IpAddr),
    #[error("system resolver: {0}")]
    System(#[from] ResolveError),
}

/// Maps an address to the names its PTR records point at.
///
/// An empty list and an error mean the same thing to callers: nothing to print.
#[async_trait]
pub trait ReverseLookup: Send + Sync {
    async fn reverse(&self, addr: IpAddr) -> Result<Vec<String>, LookupError>;
}

/// Picks the lookup implementation for this run.
///
/// Fails only when the host's resolver configuration cannot be read.
pub fn build(cfg: &ResolverConfig) -> Result<Arc<dyn ReverseLookup>, LookupError> {
    debug!("resolving through {cfg}");
    let lookup: Arc<dyn ReverseLookup> = match *cfg {
        ResolverConfig::System => Arc::new(SystemResolver::from_system_conf()?),
        ResolverConfig::Endpoint { addr, transport } => Arc::new(EndpointResolver::new(
            EndpointDialer::new(addr, transport),
            QUERY_TIMEOUT,
        )),
    };
    Ok(lookup)
}
