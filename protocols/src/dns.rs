use std::net::IpAddr;

use dns_parser::{Builder, Packet, QueryClass, QueryType, RData, ResponseCode};
use tracing::trace;

use crate::error::ProtocolError;

/// Largest response we read from a datagram.
pub const MAX_UDP_PAYLOAD: usize = 4096;

/// Builds a recursive PTR query for `ip_addr`.
pub fn create_ptr_packet(ip_addr: &IpAddr, id: u16) -> Result<Vec<u8>, ProtocolError> {
    let qname: String = reverse_address_to_ptr(ip_addr);
    let mut builder = Builder::new_query(id, true);
    builder.add_question(&qname, false, QueryType::PTR, QueryClass::IN);
    builder.build().map_err(|_| ProtocolError::Build(qname))
}

/// Extracts every PTR target from a response to the query with `id`.
///
/// Names are returned fully qualified, with the trailing root dot. An empty
/// answer section yields an empty list.
pub fn get_hostnames(payload: &[u8], id: u16) -> Result<Vec<String>, ProtocolError> {
    let packet = Packet::parse(payload)?;
    let header = &packet.header;

    if header.query {
        return Err(ProtocolError::NotAResponse);
    }
    if header.id != id {
        return Err(ProtocolError::IdMismatch {
            expected: id,
            got: header.id,
        });
    }
    if !matches!(header.response_code, ResponseCode::NoError) {
        return Err(ProtocolError::Rcode(format!("{:?}", header.response_code)));
    }
    if header.truncated {
        trace!(id, "truncated response, using the answers that arrived");
    }

    let names = packet
        .answers
        .iter()
        .filter_map(|record| match &record.data {
            RData::PTR(ptr) => Some(format!("{}.", ptr.0)),
            _ => None,
        })
        .collect();

    Ok(names)
}

/// `192.0.2.7` becomes `7.2.0.192.in-addr.arpa`; IPv6 addresses expand to
/// reversed nibbles under `ip6.arpa`.
pub fn reverse_address_to_ptr(ip_addr: &IpAddr) -> String {
    match ip_addr {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa")
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(72);
            for byte in v6.octets().iter().rev() {
                name.push_str(&format!("{:x}.{:x}.", byte & 0x0f, byte >> 4));
            }
            name.push_str("ip6.arpa");
            name
        }
    }
}
