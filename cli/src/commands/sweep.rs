use std::sync::Arc;

use anyhow::Context;
use ptrsweep_common::config::Config;
use ptrsweep_core::feed::{self, FeedSummary};
use ptrsweep_core::pool::Pool;
use ptrsweep_core::resolver;
use ptrsweep_core::sink::StdoutSink;
use tokio::io::BufReader;
use tracing::debug;

/// Expands stdin into addresses, resolves them, waits for the pool to drain.
pub async fn sweep(cfg: Arc<Config>) -> anyhow::Result<()> {
    let lookup = resolver::build(&cfg.resolver).context("loading resolver configuration")?;
    let pool = Pool::spawn(&cfg, lookup, Arc::new(StdoutSink));

    let stdin = BufReader::new(tokio::io::stdin());
    let fed: anyhow::Result<FeedSummary> = feed::feed(stdin, pool.sender()).await;

    // Drain whatever made it onto the queue even if reading stdin failed.
    let summary = pool.join().await;
    if summary.halted {
        anyhow::bail!("result output closed after {} names", summary.names);
    }
    let fed = fed?;

    debug!(
        blocks = fed.accepted,
        rejected = fed.rejected,
        addresses = fed.queued,
        names = summary.names,
        "sweep complete"
    );
    Ok(())
}
