// ── Telemetry poller ──
//
// Periodically fetches node telemetry for the views the host marks as
// active and publishes formatted tables through `watch` channels. Every
// tick draws a monotonic sequence number; a response is applied only when
// its tick is newer than whatever its table already shows, so a slow
// response can never overwrite a fresher one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use searchctl_api::{AdminClient, NodeInfo, NodeKind};

use crate::view::{NodeRow, render_nodes};

// ── View selection ──────────────────────────────────────────────────

/// Which telemetry views are currently visible.
///
/// Hosts publish this through a `watch` channel; the poller reads the
/// latest value on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSelection {
    pub crawler: bool,
    pub indexer: bool,
}

impl ViewSelection {
    pub const NONE: Self = Self {
        crawler: false,
        indexer: false,
    };

    pub const ALL: Self = Self {
        crawler: true,
        indexer: true,
    };

    pub fn only(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Crawler => Self {
                crawler: true,
                indexer: false,
            },
            NodeKind::Indexer => Self {
                crawler: false,
                indexer: true,
            },
        }
    }

    pub fn is_active(self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Crawler => self.crawler,
            NodeKind::Indexer => self.indexer,
        }
    }
}

// ── Table snapshots ─────────────────────────────────────────────────

/// The last applied poll result for one view.
#[derive(Debug, Clone, Default)]
pub struct TableSnapshot {
    /// Tick that produced this table; 0 before the first successful poll.
    pub seq: u64,
    pub rows: Arc<Vec<NodeRow>>,
    pub nodes: Arc<Vec<NodeInfo>>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl TableSnapshot {
    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }
}

/// Both telemetry tables, shareable between the poller and its hosts.
#[derive(Debug, Clone)]
pub struct TelemetryTables {
    crawler: Arc<watch::Sender<TableSnapshot>>,
    indexer: Arc<watch::Sender<TableSnapshot>>,
}

impl Default for TelemetryTables {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTables {
    pub fn new() -> Self {
        let (crawler, _) = watch::channel(TableSnapshot::default());
        let (indexer, _) = watch::channel(TableSnapshot::default());
        Self {
            crawler: Arc::new(crawler),
            indexer: Arc::new(indexer),
        }
    }

    fn sender(&self, kind: NodeKind) -> &watch::Sender<TableSnapshot> {
        match kind {
            NodeKind::Crawler => &self.crawler,
            NodeKind::Indexer => &self.indexer,
        }
    }

    /// Subscribe to replacements of one view's table.
    pub fn subscribe(&self, kind: NodeKind) -> watch::Receiver<TableSnapshot> {
        self.sender(kind).subscribe()
    }

    /// Clone the current table of one view.
    pub fn snapshot(&self, kind: NodeKind) -> TableSnapshot {
        self.sender(kind).borrow().clone()
    }

    /// Replace a view's table with a poll result from tick `seq`.
    ///
    /// The whole table is swapped in one step. Returns `false` and leaves
    /// the table untouched when a tick at least as new was already applied.
    pub fn apply(&self, kind: NodeKind, seq: u64, nodes: Vec<NodeInfo>) -> bool {
        let rows = render_nodes(&nodes);
        self.sender(kind).send_if_modified(|snap| {
            if seq <= snap.seq {
                return false;
            }
            *snap = TableSnapshot {
                seq,
                rows: Arc::new(rows),
                nodes: Arc::new(nodes),
                fetched_at: Some(Utc::now()),
            };
            true
        })
    }
}

// ── Poll tick ───────────────────────────────────────────────────────

/// Requests issued by one `refresh_info` call.
#[derive(Debug)]
pub struct PollTick {
    pub seq: u64,
    kinds: Vec<NodeKind>,
    handles: Vec<JoinHandle<()>>,
}

impl PollTick {
    /// Views a request was issued for.
    pub fn kinds(&self) -> &[NodeKind] {
        &self.kinds
    }

    pub fn request_count(&self) -> usize {
        self.handles.len()
    }

    /// Wait until every request of this tick has been applied or dropped.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "telemetry request task failed");
            }
        }
    }
}

// ── Poller ──────────────────────────────────────────────────────────

/// Fetches telemetry for the active views on a fixed period.
pub struct Poller {
    client: Arc<AdminClient>,
    tables: TelemetryTables,
    selection: watch::Receiver<ViewSelection>,
    period: Duration,
    next_seq: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(
        client: Arc<AdminClient>,
        selection: watch::Receiver<ViewSelection>,
        period: Duration,
    ) -> Self {
        Self {
            client,
            tables: TelemetryTables::new(),
            selection,
            period: period.max(Duration::from_millis(1)),
            next_seq: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
        }
    }

    /// The tables this poller writes to.
    pub fn tables(&self) -> TelemetryTables {
        self.tables.clone()
    }

    /// Issue one round of telemetry requests without waiting for them.
    ///
    /// With `force_all` both views are fetched; otherwise only those the
    /// current selection marks active. Each request applies its own result
    /// when it completes.
    pub fn refresh_info(&self, force_all: bool) -> PollTick {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let selection = *self.selection.borrow();

        let kinds: Vec<NodeKind> = NodeKind::ALL
            .into_iter()
            .filter(|&kind| force_all || selection.is_active(kind))
            .collect();
        trace!(seq, force_all, ?kinds, "poll tick");

        let handles = kinds
            .iter()
            .map(|&kind| {
                let client = Arc::clone(&self.client);
                let tables = self.tables.clone();
                let cancel = self.cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => {
                            trace!(%kind, seq, "telemetry request cancelled");
                        }
                        () = fetch_view(&client, &tables, kind, seq) => {}
                    }
                })
            })
            .collect();

        PollTick {
            seq,
            kinds,
            handles,
        }
    }

    /// Run an immediate full refresh, then poll the active views every
    /// period until the returned handle is stopped or dropped.
    pub fn start(self) -> PollerHandle {
        self.spawn(true)
    }

    /// Like [`start`](Self::start), but the first refresh only covers the
    /// views the selection marks active.
    pub fn start_selected(self) -> PollerHandle {
        self.spawn(false)
    }

    fn spawn(self, force_first: bool) -> PollerHandle {
        let cancel = self.cancel.clone();
        let tables = self.tables.clone();
        let task = tokio::spawn(async move { self.run(force_first).await });
        PollerHandle {
            cancel,
            tables,
            task: Some(task),
        }
    }

    async fn run(self, force_first: bool) {
        self.refresh_info(force_first);

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // Consume the immediate first tick; the first refresh covered it.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                _ = interval.tick() => {
                    self.refresh_info(false);
                }
            }
        }
        debug!("telemetry poller stopped");
    }
}

async fn fetch_view(client: &AdminClient, tables: &TelemetryTables, kind: NodeKind, seq: u64) {
    match client.monitor(kind).await {
        Ok(nodes) => {
            let count = nodes.len();
            if tables.apply(kind, seq, nodes) {
                debug!(%kind, seq, count, "telemetry table replaced");
            } else {
                debug!(%kind, seq, "discarding stale telemetry response");
            }
        }
        Err(e) => {
            warn!(%kind, seq, error = %e, "telemetry refresh failed; keeping previous table");
        }
    }
}

// ── Lifecycle handle ────────────────────────────────────────────────

/// Owns a running poller. Stopping (or dropping) it cancels the timer and
/// any request still in flight.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    tables: TelemetryTables,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn tables(&self) -> &TelemetryTables {
        &self.tables
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the poller and wait for its timer task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "poller task failed");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
