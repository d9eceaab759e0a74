//! # Resolution Pool
//!
//! A fixed set of workers draining one shared queue of addresses.
//!
//! The queue is a bounded tokio channel of capacity one, so a producer can run
//! at most one address ahead of the workers. Its single receiver sits behind a
//! mutex shared by every worker: whoever holds the lock takes the next address,
//! which guarantees each address is handed to exactly one worker.
//!
//! Closing the channel is the normal shutdown signal. Once every sender is
//! gone, `recv` returns `None` after the last buffered address, each worker
//! falls out of its loop, and [`Pool::join`] returns.
//!
//! The one exception is a sink that stops accepting lines (stdout closed by
//! `| head`, say). The worker that sees it raises a stop flag, every worker
//! leaves its loop, the receiver is dropped with the last of them, and the
//! producer's next send fails.

use std::io;
use std::net::IpAddr;
use std::ops::AddAssign;
use std::sync::Arc;

use ptrsweep_common::config::{Config, OutputMode};
use ptrsweep_common::output;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

use crate::resolver::ReverseLookup;
use crate::sink::Sink;

const QUEUE_DEPTH: usize = 1;

type Queue = Arc<Mutex<mpsc::Receiver<IpAddr>>>;

/// What the workers did, summed over all of them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolSummary {
    /// Addresses taken off the queue.
    pub processed: usize,
    /// Addresses that produced at least one name.
    pub resolved: usize,
    /// Lines written to the sink.
    pub names: usize,
    /// The sink failed and the workers quit before the queue closed.
    pub halted: bool,
}

impl AddAssign for PoolSummary {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.resolved += other.resolved;
        self.names += other.names;
        self.halted |= other.halted;
    }
}

pub struct Pool {
    tx: mpsc::Sender<IpAddr>,
    workers: JoinSet<PoolSummary>,
}

impl Pool {
    /// Starts `cfg.workers` workers. Must be called inside a tokio runtime.
    pub fn spawn(cfg: &Config, lookup: Arc<dyn ReverseLookup>, sink: Arc<dyn Sink>) -> Self {
        let (tx, rx) = mpsc::channel::<IpAddr>(QUEUE_DEPTH);
        let queue: Queue = Arc::new(Mutex::new(rx));
        let (stop, _) = watch::channel(false);
        let stop = Arc::new(stop);
        let mut workers = JoinSet::new();

        for id in 0..cfg.workers {
            workers.spawn(work(
                id,
                queue.clone(),
                stop.clone(),
                lookup.clone(),
                sink.clone(),
                cfg.output,
            ));
        }
        debug!(workers = cfg.workers, "resolution pool started");

        Self { tx, workers }
    }

    /// A producer handle. The queue closes once every handle and the pool's own
    /// sender (dropped by [`Pool::join`]) are gone.
    pub fn sender(&self) -> mpsc::Sender<IpAddr> {
        self.tx.clone()
    }

    /// Closes the pool's side of the queue and waits for every worker to drain.
    pub async fn join(self) -> PoolSummary {
        let Pool { tx, mut workers } = self;
        drop(tx);

        let mut summary = PoolSummary::default();
        while let Some(res) = workers.join_next().await {
            match res {
                Ok(part) => summary += part,
                Err(e) => error!("resolution worker died: {e}"),
            }
        }
        debug!(
            processed = summary.processed,
            resolved = summary.resolved,
            names = summary.names,
            halted = summary.halted,
            "resolution pool drained"
        );
        summary
    }
}

async fn work(
    id: usize,
    queue: Queue,
    stop: Arc<watch::Sender<bool>>,
    lookup: Arc<dyn ReverseLookup>,
    sink: Arc<dyn Sink>,
    mode: OutputMode,
) -> PoolSummary {
    let mut summary = PoolSummary::default();
    let mut stopped = stop.subscribe();

    'queue: loop {
        let next: Option<IpAddr> = tokio::select! {
            _ = async { let _ = stopped.wait_for(|halt| *halt).await; } => None,
            addr = async { queue.lock().await.recv().await } => addr,
        };
        let Some(addr) = next else { break };
        summary.processed += 1;

        let names: Vec<String> = match lookup.reverse(addr).await {
            Ok(names) => names,
            Err(e) => {
                trace!(worker = id, %addr, "lookup failed: {e}");
                continue;
            }
        };
        if !names.is_empty() {
            summary.resolved += 1;
        }
        for name in &names {
            if let Err(e) = sink.emit(&output::format_line(mode, addr, name)) {
                if e.kind() == io::ErrorKind::BrokenPipe {
                    debug!(worker = id, "output closed, stopping");
                } else {
                    error!("writing result failed: {e}");
                }
                summary.halted = true;
                stop.send_replace(true);
                break 'queue;
            }
            summary.names += 1;
        }
    }

    trace!(worker = id, processed = summary.processed, "worker done");
    summary
}
