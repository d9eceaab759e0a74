use std::net::IpAddr;

use anyhow::Context;
use ptrsweep_common::network::cidr::CidrBlock;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Counts from one pass over the input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub queued: usize,
}

/// Reads one CIDR block per line and pushes every host address onto `queue`.
///
/// Unparseable lines, including ones that are not UTF-8, are reported and
/// skipped. Blank lines are ignored. Only a failing reader ends the pass early.
/// Each send waits until a worker is ready for it. Dropping `queue` on return
/// is what lets the workers finish.
pub async fn feed<R>(reader: R, queue: mpsc::Sender<IpAddr>) -> anyhow::Result<FeedSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = FeedSummary::default();
    let mut lines = reader.split(b'\n');

    while let Some(raw) = lines.next_segment().await.context("reading CIDR input")? {
        let line = String::from_utf8_lossy(&raw);
        let input: &str = line.trim();
        if input.is_empty() {
            continue;
        }

        let block: CidrBlock = match input.parse() {
            Ok(block) => block,
            Err(e) => {
                error!("Error parsing CIDR {input}: {e}");
                summary.rejected += 1;
                continue;
            }
        };
        if block.is_degenerate() {
            warn!("{block} has no addresses besides network and broadcast");
        }

        for addr in block.hosts() {
            queue
                .send(addr)
                .await
                .context("work queue closed while input remained")?;
            summary.queued += 1;
        }
        summary.accepted += 1;
    }

    Ok(summary)
}
