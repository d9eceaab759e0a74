//! # Resolver Connections
//!
//! The connection factory behind explicit-endpoint lookups. A [`Dialer`] is
//! handed to the resolver at construction time, so where queries go is decided
//! by whoever builds the resolver rather than by any global state.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use ptrsweep_common::config::Transport;
use ptrsweep_protocols::{dns::MAX_UDP_PAYLOAD, stream};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

/// Opens a fresh connection to a DNS server for a single exchange.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn dial(&self) -> io::Result<Connection>;
}

pub enum Connection {
    Stream(TcpStream),
    Datagram(UdpSocket),
}

impl Connection {
    /// Sends one query and waits for one reply.
    pub async fn exchange(&mut self, query: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Connection::Stream(tcp) => {
                let framed: Vec<u8> = stream::frame(query).map_err(io::Error::other)?;
                tcp.write_all(&framed).await?;
                let len: usize = tcp.read_u16().await? as usize;
                let mut buffer: Vec<u8> = vec![0u8; len];
                tcp.read_exact(&mut buffer).await?;
                Ok(buffer)
            }
            Connection::Datagram(udp) => {
                udp.send(query).await?;
                let mut buffer: Vec<u8> = vec![0u8; MAX_UDP_PAYLOAD];
                let len: usize = udp.recv(&mut buffer).await?;
                buffer.truncate(len);
                Ok(buffer)
            }
        }
    }
}

/// Dials one fixed server with one fixed transport, whatever the system says.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDialer {
    addr: SocketAddr,
    transport: Transport,
}

impl EndpointDialer {
    pub fn new(addr: SocketAddr, transport: Transport) -> Self {
        Self { addr, transport }
    }
}

#[async_trait]
impl Dialer for EndpointDialer {
    async fn dial(&self) -> io::Result<Connection> {
        match self.transport {
            Transport::Tcp => Ok(Connection::Stream(TcpStream::connect(self.addr).await?)),
            Transport::Udp => {
                let local: SocketAddr = match self.addr {
                    SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
                    SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
                };
                let socket = UdpSocket::bind(local).await?;
                socket.connect(self.addr).await?;
                Ok(Connection::Datagram(socket))
            }
        }
    }
}
