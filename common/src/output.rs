use std::net::IpAddr;

use crate::config::OutputMode;

/// Drops one trailing root-label dot, if any.
pub fn trim_root(hostname: &str) -> &str {
    hostname.strip_suffix('.').unwrap_or(hostname)
}

/// Renders one result line (without the newline).
pub fn format_line(mode: OutputMode, addr: IpAddr, hostname: &str) -> String {
    let hostname = trim_root(hostname);
    match mode {
        OutputMode::Pair => format!("{addr}\t{hostname}"),
        OutputMode::DomainOnly => hostname.to_string(),
    }
}
