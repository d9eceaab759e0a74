//! # CIDR Expansion
//!
//! Turns a line such as `192.168.1.0/24` into the host addresses it covers.
//!
//! The network and broadcast addresses (first and last of the block) are never
//! produced. Blocks too small to have anything in between, IPv4 `/31` and `/32`
//! or IPv6 `/127` and `/128`, expand to nothing.
//!
//! Expansion is lazy: the iterator walks the block by adding one to the address
//! bytes with carry, so a `/8` or an IPv6 `/64` costs no memory up front.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use crate::error::CidrError;

/// A parsed network prefix. Host bits given in the input are masked away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrBlock {
    network: IpNetwork,
}

impl FromStr for CidrBlock {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| CidrError::MissingPrefix(s.to_string()))?;

        let ip: IpAddr = addr.parse().map_err(|_| CidrError::InvalidAddress {
            input: s.to_string(),
            addr: addr.to_string(),
        })?;

        let bad_prefix = || CidrError::InvalidPrefix {
            input: s.to_string(),
            prefix: prefix.to_string(),
        };
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad_prefix());
        }
        let prefix: u8 = prefix.parse().map_err(|_| bad_prefix())?;
        let given = IpNetwork::new(ip, prefix).map_err(|_| bad_prefix())?;
        let network = IpNetwork::new(given.network(), prefix).map_err(|_| bad_prefix())?;

        Ok(Self { network })
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.prefix())
    }
}

impl CidrBlock {
    /// The network address, with every host bit zeroed.
    pub fn base(&self) -> IpAddr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        self.network.contains(addr)
    }

    /// Number of host bits in the block (32 or 128 minus the prefix).
    pub fn host_bits(&self) -> u8 {
        let width: u8 = match self.network {
            IpNetwork::V4(_) => 32,
            IpNetwork::V6(_) => 128,
        };
        width - self.prefix()
    }

    /// True when dropping the network and broadcast addresses leaves nothing.
    pub fn is_degenerate(&self) -> bool {
        self.host_bits() < 2
    }

    /// Usable hosts in ascending order, network and broadcast excluded.
    pub fn hosts(&self) -> Hosts {
        let next = if self.is_degenerate() {
            None
        } else {
            increment(self.base())
        };
        Hosts {
            block: *self,
            next,
        }
    }
}

/// Iterator returned by [`CidrBlock::hosts`].
#[derive(Debug, Clone)]
pub struct Hosts {
    block: CidrBlock,
    next: Option<IpAddr>,
}

impl Iterator for Hosts {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.next.take()?;
        // The address whose successor leaves the block is the broadcast.
        let successor = increment(current).filter(|addr| self.block.contains(*addr))?;
        self.next = Some(successor);
        Some(current)
    }
}

/// Adds one to an address, treating it as a big-endian unsigned integer.
///
/// Returns `None` when the addition carries out of the most significant byte.
pub fn increment(addr: IpAddr) -> Option<IpAddr> {
    match addr {
        IpAddr::V4(v4) => {
            let mut octets: [u8; 4] = v4.octets();
            (!add_one(&mut octets)).then(|| IpAddr::V4(Ipv4Addr::from(octets)))
        }
        IpAddr::V6(v6) => {
            let mut octets: [u8; 16] = v6.octets();
            (!add_one(&mut octets)).then(|| IpAddr::V6(Ipv6Addr::from(octets)))
        }
    }
}

/// Returns true if the carry ran off the top byte.
fn add_one(bytes: &mut [u8]) -> bool {
    for byte in bytes.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            return false;
        }
    }
    true
}
