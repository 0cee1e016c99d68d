//! Persistence worker.
//!
//! Bridges the synchronous game loop with an async [`ScoreStore`]. The loop
//! enqueues jobs with a non-blocking `try_send` and drains completions with
//! `try_recv`; it never waits on I/O.

use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::StoreConfig;
use crate::record::{NewScoreRecord, RecordId, ScoreRecord};
use crate::remote::RemoteStore;
use crate::store::{MemoryStore, ScoreStore};
use crate::types::{LEADERBOARD_LIMIT, SCORES_COLLECTION};

/// Work handed to the persistence task.
#[derive(Debug, Clone)]
pub enum PersistJob {
    Submit(NewScoreRecord),
    /// `request` is echoed in the matching [`PersistEvent::Leaderboard`].
    FetchTop { request: u64, limit: usize },
}

/// Completion delivered back to the game loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistEvent {
    Submitted {
        id: RecordId,
        player_name: String,
        score: u32,
    },
    SubmitFailed {
        player_name: String,
        score: u32,
    },
    /// Top scores, best first. Empty when the fetch failed.
    Leaderboard {
        request: u64,
        records: Vec<ScoreRecord>,
    },
}

/// Running persistence worker.
pub struct Persistence {
    rt: Runtime,
    worker: JoinHandle<()>,
    job_tx: mpsc::Sender<PersistJob>,
    event_rx: mpsc::UnboundedReceiver<PersistEvent>,
}

impl Persistence {
    /// Start a worker over `store` with a queue of `max_pending` jobs.
    pub fn start<S: ScoreStore>(store: S, max_pending: usize) -> anyhow::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<PersistJob>(max_pending.max(1));
        let (event_tx, event_rx) = mpsc::unbounded_channel::<PersistEvent>();

        let rt = Runtime::new()?;
        let worker = rt.spawn(run_jobs(store, job_rx, event_tx));

        Ok(Self {
            rt,
            worker,
            job_tx,
            event_rx,
        })
    }

    /// Remote store from environment variables, or an in-memory store when
    /// `LANE_DODGE_STORE_DISABLED` is set.
    pub fn start_from_env() -> anyhow::Result<Self> {
        let config = StoreConfig::from_env();
        if StoreConfig::is_disabled() {
            tracing::info!("score store disabled, keeping scores in memory");
            return Self::start(MemoryStore::new(), config.max_pending);
        }
        tracing::info!(addr = %config.addr(), "using remote score store");
        Self::start(RemoteStore::from_config(&config), config.max_pending)
    }

    /// Queue a finished run. Returns false when the job was dropped.
    pub fn submit(&self, record: NewScoreRecord) -> bool {
        self.enqueue(PersistJob::Submit(record))
    }

    /// Queue a leaderboard fetch tagged with `request`. Returns false when
    /// the job was dropped.
    pub fn fetch_leaderboard(&self, request: u64) -> bool {
        self.enqueue(PersistJob::FetchTop {
            request,
            limit: LEADERBOARD_LIMIT,
        })
    }

    pub fn try_recv(&mut self) -> Option<PersistEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stop accepting jobs and wait up to `grace` for the queued ones to
    /// finish. Jobs still pending after that are dropped with a warning.
    pub fn shutdown(self, grace: Duration) {
        let Self {
            rt,
            worker,
            job_tx,
            event_rx,
        } = self;

        let queued = job_tx.max_capacity() - job_tx.capacity();
        // Closing the queue lets the worker exit once it is drained.
        drop(job_tx);

        match rt.block_on(async { tokio::time::timeout(grace, worker).await }) {
            Ok(Ok(())) => tracing::debug!(queued, "persistence worker drained"),
            Ok(Err(e)) => tracing::warn!(error = %e, "persistence worker failed"),
            Err(_) => tracing::warn!(
                queued,
                grace_ms = grace.as_millis() as u64,
                "persistence worker still busy at shutdown, dropping pending jobs"
            ),
        }
        drop(event_rx);
        rt.shutdown_timeout(Duration::from_millis(100));
    }

    fn enqueue(&self, job: PersistJob) -> bool {
        match self.job_tx.try_send(job) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(job)) => {
                tracing::warn!(?job, "persistence queue full, dropping job");
                false
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                tracing::warn!(?job, "persistence worker stopped, dropping job");
                false
            }
        }
    }
}

// Jobs run one at a time so a fetch queued after a submit sees the new record.
async fn run_jobs<S: ScoreStore>(
    store: S,
    mut job_rx: mpsc::Receiver<PersistJob>,
    event_tx: mpsc::UnboundedSender<PersistEvent>,
) {
    while let Some(job) = job_rx.recv().await {
        let event = match job {
            PersistJob::Submit(record) => {
                let player_name = record.player_name.clone();
                let score = record.score;
                match submit_score(&store, record).await {
                    Some(id) => PersistEvent::Submitted {
                        id,
                        player_name,
                        score,
                    },
                    None => PersistEvent::SubmitFailed { player_name, score },
                }
            }
            PersistJob::FetchTop { request, limit } => PersistEvent::Leaderboard {
                request,
                records: read_leaderboard(&store, limit).await,
            },
        };
        // The receiver may be gone during shutdown; keep draining.
        let _ = event_tx.send(event);
    }
}

/// Write a score record. Failures are logged and swallowed.
pub async fn submit_score<S: ScoreStore>(store: &S, record: NewScoreRecord) -> Option<RecordId> {
    let score = record.score;
    match store.create(SCORES_COLLECTION, record).await {
        Ok(id) => {
            tracing::info!(%id, score, "score submitted");
            Some(id)
        }
        Err(e) => {
            tracing::warn!(score, error = %e, "score submission failed");
            None
        }
    }
}

/// Top `limit` scores. Failures are logged and read as an empty list.
pub async fn read_leaderboard<S: ScoreStore>(store: &S, limit: usize) -> Vec<ScoreRecord> {
    match store.top_scores(SCORES_COLLECTION, limit).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "leaderboard fetch failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerName;
    use std::time::{Duration, Instant};

    fn wait_event(p: &mut Persistence) -> PersistEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(ev) = p.try_recv() {
                return ev;
            }
            assert!(Instant::now() < deadline, "no persistence event");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn submit_then_fetch_sees_record() {
        let mut p = Persistence::start(MemoryStore::new(), 4).unwrap();
        let name = PlayerName::parse("Ana").unwrap();
        assert!(p.submit(NewScoreRecord::now(&name, 120)));
        assert!(p.fetch_leaderboard(1));

        match wait_event(&mut p) {
            PersistEvent::Submitted {
                player_name, score, ..
            } => {
                assert_eq!(player_name, "Ana");
                assert_eq!(score, 120);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match wait_event(&mut p) {
            PersistEvent::Leaderboard { request, records } => {
                assert_eq!(request, 1);
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].player_name, "Ana");
                assert_eq!(records[0].score, 120);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn try_recv_is_empty_without_jobs() {
        let mut p = Persistence::start(MemoryStore::new(), 1).unwrap();
        assert!(p.try_recv().is_none());
    }

    #[test]
    fn shutdown_of_idle_worker_returns_promptly() {
        let p = Persistence::start(MemoryStore::new(), 4).unwrap();
        let started = Instant::now();
        p.shutdown(Duration::from_secs(5));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
