use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use ptrsweep_protocols::dns;

use super::{LookupError, ReverseLookup};
use crate::network::dial::Dialer;

/// Sends PTR queries over connections obtained from `D`.
///
/// One connection per query, no retries. The whole exchange, dial included,
/// must finish within `timeout`.
pub struct EndpointResolver<D> {
    dialer: D,
    timeout: Duration,
}

impl<D: Dialer> EndpointResolver<D> {
    pub fn new(dialer: D, timeout: Duration) -> Self {
        Self { dialer, timeout }
    }
}

#[async_trait]
impl<D: Dialer> ReverseLookup for EndpointResolver<D> {
    async fn reverse(&self, addr: IpAddr) -> Result<Vec<String>, LookupError> {
        let id: u16 = rand::random();
        let query: Vec<u8> = dns::create_ptr_packet(&addr, id)?;

        let exchange = async {
            let mut conn = self.dialer.dial().await?;
            conn.exchange(&query).await
        };
        let response: Vec<u8> = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| LookupError::Timeout(addr))??;

        Ok(dns::get_hostnames(&response, id)?)
    }
}
