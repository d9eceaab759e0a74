pub mod sweep;

use std::net::IpAddr;

use clap::{ArgAction, Parser, ValueEnum};
use ptrsweep_common::config::{
    Config, DEFAULT_DNS_PORT, DEFAULT_WORKERS, OutputMode, ResolverConfig, Transport,
};
use ptrsweep_common::error::ConfigError;

/// Transport used to reach `--resolver`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    #[value(alias = "stream")]
    Tcp,
    #[value(alias = "datagram")]
    Udp,
}

impl From<Protocol> for Transport {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Tcp => Transport::Tcp,
            Protocol::Udp => Transport::Udp,
        }
    }
}

/// Reads CIDR blocks from stdin, one per line, and prints the PTR names of
/// every host address in them.
#[derive(Parser, Debug)]
#[command(name = "ptrsweep")]
#[command(about = "Bulk reverse DNS over CIDR blocks read from stdin.")]
pub struct CommandLine {
    /// How many lookups run concurrently
    #[arg(short = 't', long = "threads", default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// IP of the DNS resolver to use instead of the system one
    #[arg(short = 'r', long = "resolver")]
    pub resolver: Option<IpAddr>,

    /// Protocol used to reach --resolver
    #[arg(short = 'P', long = "protocol", value_enum, ignore_case = true, default_value_t = Protocol::Udp)]
    pub protocol: Protocol,

    /// Port of --resolver
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_DNS_PORT)]
    pub port: u16,

    /// Print only the hostnames
    #[arg(short = 'd', long = "domain")]
    pub domain: bool,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let resolver = ResolverConfig::from_parts(self.resolver, self.port, self.protocol.into());
        let output = if self.domain {
            OutputMode::DomainOnly
        } else {
            OutputMode::Pair
        };
        Config::new(self.threads, resolver, output)
    }
}
