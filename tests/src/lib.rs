//! Shared test doubles for the end-to-end tests.

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;

use async_trait::async_trait;
use dns_parser::Packet;
use ptrsweep_core::resolver::{LookupError, ReverseLookup};
use ptrsweep_core::sink::Sink;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};

/// Collects emitted lines in memory.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn sorted(&self) -> Vec<String> {
        let mut lines = self.lines.lock().unwrap().clone();
        lines.sort();
        lines
    }
}

impl Sink for MemorySink {
    fn emit(&self, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Records every address it is asked about and answers from a fixed table.
///
/// Addresses missing from the table fail, as a lookup with no PTR record would.
#[derive(Default)]
pub struct RecordingResolver {
    names: HashMap<IpAddr, Vec<String>>,
    seen: Mutex<Vec<IpAddr>>,
}

impl RecordingResolver {
    pub fn with_names(names: HashMap<IpAddr, Vec<String>>) -> Self {
        Self {
            names,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<IpAddr> {
        let mut seen = self.seen.lock().unwrap().clone();
        seen.sort();
        seen
    }
}

#[async_trait]
impl ReverseLookup for RecordingResolver {
    async fn reverse(&self, addr: IpAddr) -> Result<Vec<String>, LookupError> {
        self.seen.lock().unwrap().push(addr);
        tokio::task::yield_now().await;
        self.names
            .get(&addr)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no PTR record").into())
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut encoded = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        encoded.push(label.len() as u8);
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    encoded
}

/// Offset just past the single question of `query`.
fn question_end(query: &[u8]) -> usize {
    let mut cursor = 12;
    while cursor < query.len() && query[cursor] != 0 {
        cursor += query[cursor] as usize + 1;
    }
    (cursor + 5).min(query.len())
}

/// Answers a PTR query from `table` (keyed by the in-addr.arpa name).
/// Unknown names get NXDOMAIN.
pub fn answer(query: &[u8], table: &HashMap<String, Vec<String>>) -> Vec<u8> {
    let qname = Packet::parse(query)
        .map(|p| p.questions[0].qname.to_string())
        .unwrap_or_default();

    let mut resp = query[..question_end(query)].to_vec();
    resp[2] |= 0x80;
    // Only the question is echoed back; drop any OPT record the client sent.
    resp[8..12].fill(0);
    let Some(names) = table.get(&qname) else {
        resp[3] = 0x80 | 3;
        return resp;
    };

    resp[3] = 0x80;
    resp[6..8].copy_from_slice(&(names.len() as u16).to_be_bytes());
    for name in names {
        resp.extend_from_slice(&[0xc0, 0x0c]);
        resp.extend_from_slice(&12u16.to_be_bytes());
        resp.extend_from_slice(&1u16.to_be_bytes());
        resp.extend_from_slice(&60u32.to_be_bytes());
        let rdata = encode_name(name);
        resp.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        resp.extend_from_slice(&rdata);
    }
    resp
}

/// A loopback DNS server answering over UDP until the test ends.
pub async fn spawn_udp_server(table: HashMap<String, Vec<String>>) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
            let resp = answer(&buf[..len], &table);
            let _ = socket.send_to(&resp, peer).await;
        }
    });
    addr
}

/// A loopback DNS server answering over TCP, one query per connection.
pub async fn spawn_tcp_server(table: HashMap<String, Vec<String>>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            let table = table.clone();
            tokio::spawn(async move {
                let len = sock.read_u16().await.unwrap() as usize;
                let mut query = vec![0u8; len];
                sock.read_exact(&mut query).await.unwrap();
                let resp = answer(&query, &table);
                sock.write_u16(resp.len() as u16).await.unwrap();
                sock.write_all(&resp).await.unwrap();
            });
        }
    });
    addr
}
