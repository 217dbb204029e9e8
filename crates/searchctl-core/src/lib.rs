//! Polling, rendering, and admin actions between `searchctl-api` and the
//! CLI / TUI hosts.
//!
//! - **[`Poller`]**: Recurring, cancellable telemetry refresh. Reads the
//!   host's [`ViewSelection`] on every tick, fetches only the active views
//!   (or both when forced), and publishes formatted tables through
//!   [`TelemetryTables`]. Ticks carry a monotonic sequence number so late
//!   responses never overwrite fresher ones.
//!
//! - **[`AdminActions`]**: Include-domain, blacklist, and illegal-keyword
//!   handlers. Each performs one admin call and yields a fixed
//!   [`Feedback`] message; list deletes act on the row they were given.
//!
//! - **[`format`] / [`view`]**: Pure formatting of raw telemetry into
//!   table rows.

pub mod admin;
pub mod config;
pub mod error;
pub mod format;
pub mod poller;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use admin::{
    AdminActions, DeleteOutcome, Feedback, FeedbackLevel, ListKind, ListRow, ListTable, TextField,
    Trigger,
};
pub use config::{PanelConfig, TlsVerification};
pub use error::CoreError;
pub use poller::{PollTick, Poller, PollerHandle, TableSnapshot, TelemetryTables, ViewSelection};
pub use view::{NodeRow, NodeStatus};

pub use searchctl_api::{AdminClient, CrawlerNode, IndexerNode, NodeInfo, NodeKind};
