use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, TokioResolver};

use super::{LookupError, ReverseLookup};

/// Reverse lookups against the nameservers the host is configured with
/// (`/etc/resolv.conf` on unix, the registry on windows).
///
/// Every PTR record in the answer is returned, fully qualified.
pub struct SystemResolver {
    inner: TokioResolver,
}

impl SystemResolver {
    pub fn from_system_conf() -> Result<Self, ResolveError> {
        let inner = TokioResolver::builder_tokio()?.build();
        Ok(Self { inner })
    }

    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        let inner = TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();
        Self { inner }
    }
}

#[async_trait]
impl ReverseLookup for SystemResolver {
    async fn reverse(&self, addr: IpAddr) -> Result<Vec<String>, LookupError> {
        let answer = self.inner.reverse_lookup(addr).await?;
        Ok(answer.iter().map(|ptr| ptr.0.to_string()).collect())
    }
}
