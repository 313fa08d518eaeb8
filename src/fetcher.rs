//! Background request worker.
//!
//! Queries run on a dedicated thread so the UI keeps redrawing while the
//! server is slow. Each submitted job gets a sequence number; results of jobs
//! superseded by a newer request of the same kind are marked stale so the
//! caller can drop them instead of rendering outdated data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::api::{LogEntry, QueryRequest, StatMap};
use crate::client::{ClientError, LogSource};

/// Which endpoint a job targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Stat,
    List,
}

impl QueryKind {
    fn index(self) -> usize {
        match self {
            QueryKind::Stat => 0,
            QueryKind::List => 1,
        }
    }
}

/// A request queued for the worker.
#[derive(Debug, Clone)]
pub struct FetchJob {
    pub seq: u64,
    pub kind: QueryKind,
    pub query: QueryRequest,
    /// Issued by the follow-mode poller.
    pub polled: bool,
}

/// Result payload of a finished job.
#[derive(Debug)]
pub enum FetchOutcome {
    Stat(Result<StatMap, ClientError>),
    List(Result<Vec<LogEntry>, ClientError>),
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        match self {
            FetchOutcome::Stat(r) => r.is_ok(),
            FetchOutcome::List(r) => r.is_ok(),
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            FetchOutcome::Stat(_) => QueryKind::Stat,
            FetchOutcome::List(_) => QueryKind::List,
        }
    }
}

/// A finished job as delivered back to the UI thread.
#[derive(Debug)]
pub struct FetchResult {
    pub seq: u64,
    pub polled: bool,
    pub outcome: FetchOutcome,
}

/// Handle used by the UI thread to queue requests.
pub struct Fetcher {
    jobs: Sender<FetchJob>,
    next_seq: u64,
    /// Latest issued sequence number per query kind, shared with the worker.
    latest: Arc<[AtomicU64; 2]>,
}

impl Fetcher {
    /// Spawns the worker thread. `deliver` hands results back to the UI and
    /// returns `false` once the receiving side is gone, which stops the worker.
    pub fn spawn<F>(source: Box<dyn LogSource>, deliver: F) -> Self
    where
        F: Fn(FetchResult) -> bool + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<FetchJob>();
        let latest: Arc<[AtomicU64; 2]> = Arc::new([AtomicU64::new(0), AtomicU64::new(0)]);
        let worker_latest = Arc::clone(&latest);

        thread::spawn(move || {
            for job in rx {
                let newest = worker_latest[job.kind.index()].load(Ordering::Acquire);
                if !job.polled && job.seq < newest {
                    trace!(seq = job.seq, newest, kind = ?job.kind, "skipping superseded job");
                    continue;
                }

                let started = Instant::now();
                let outcome = match job.kind {
                    QueryKind::Stat => FetchOutcome::Stat(source.stat(&job.query)),
                    QueryKind::List => FetchOutcome::List(source.list(&job.query)),
                };
                debug!(
                    seq = job.seq,
                    kind = ?job.kind,
                    ok = outcome.is_ok(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "fetch finished"
                );

                let result = FetchResult {
                    seq: job.seq,
                    polled: job.polled,
                    outcome,
                };
                if !deliver(result) {
                    break;
                }
            }
            debug!("fetch worker stopped");
        });

        Self {
            jobs: tx,
            next_seq: 0,
            latest,
        }
    }

    /// Creates a fetcher without a worker; queued jobs can be inspected
    /// through the returned receiver.
    #[cfg(test)]
    pub fn detached() -> (Self, mpsc::Receiver<FetchJob>) {
        let (tx, rx) = mpsc::channel();
        let fetcher = Self {
            jobs: tx,
            next_seq: 0,
            latest: Arc::new([AtomicU64::new(0), AtomicU64::new(0)]),
        };
        (fetcher, rx)
    }

    /// Queues a request and returns its sequence number.
    pub fn submit(&mut self, kind: QueryKind, query: QueryRequest, polled: bool) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest[kind.index()].store(seq, Ordering::Release);

        let job = FetchJob {
            seq,
            kind,
            query,
            polled,
        };
        if self.jobs.send(job).is_err() {
            warn!(seq, ?kind, "fetch worker is gone, request dropped");
        }
        seq
    }

    /// Returns `true` if `result` answers the newest request of its kind.
    pub fn is_current(&self, result: &FetchResult) -> bool {
        let kind = result.outcome.kind();
        result.seq >= self.latest[kind.index()].load(Ordering::Acquire)
    }
}
