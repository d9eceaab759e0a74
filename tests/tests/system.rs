use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use ptrsweep_common::config::{Config, OutputMode, ResolverConfig as SweepResolver};
use ptrsweep_core::feed::feed;
use ptrsweep_core::pool::Pool;
use ptrsweep_core::resolver::{ReverseLookup, SystemResolver};
use ptrsweep_integration_tests::{MemorySink, spawn_udp_server};

fn table() -> HashMap<String, Vec<String>> {
    let mut table = HashMap::new();
    table.insert(
        "5.0.0.10.in-addr.arpa".to_string(),
        vec![
            "www.example.".to_string(),
            "mail.example.".to_string(),
            "ftp.example.".to_string(),
        ],
    );
    table
}

async fn resolver() -> SystemResolver {
    let server = spawn_udp_server(table()).await;
    let nameservers = NameServerConfigGroup::from_ips_clear(&[server.ip()], server.port(), true);
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(2);
    opts.attempts = 1;
    SystemResolver::with_config(ResolverConfig::from_parts(None, vec![], nameservers), opts)
}

#[tokio::test]
async fn every_ptr_record_is_returned() {
    let resolver = resolver().await;
    let mut names = resolver
        .reverse(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)))
        .await
        .unwrap();
    names.sort();
    assert_eq!(names, vec!["ftp.example.", "mail.example.", "www.example."]);
}

#[tokio::test]
async fn missing_record_is_an_error() {
    let resolver = resolver().await;
    assert!(resolver.reverse(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 6))).await.is_err());
}

#[tokio::test]
async fn pool_prints_one_line_per_name() {
    let cfg = Config::new(2, SweepResolver::System, OutputMode::Pair).unwrap();
    let sink = Arc::new(MemorySink::default());
    let pool = Pool::spawn(&cfg, Arc::new(resolver().await), sink.clone());

    feed("10.0.0.4/30\n".as_bytes(), pool.sender()).await.unwrap();
    let summary = pool.join().await;

    assert_eq!(summary.processed, 2);
    assert_eq!(
        sink.sorted(),
        vec![
            "10.0.0.5\tftp.example",
            "10.0.0.5\tmail.example",
            "10.0.0.5\twww.example",
        ]
    );
}
