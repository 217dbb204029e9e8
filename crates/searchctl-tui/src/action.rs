//! All possible UI actions. Actions are the sole mechanism for state mutation.

use searchctl_core::{
    DeleteOutcome, Feedback, ListKind, ListRow, ListTable, NodeKind, TableSnapshot, Trigger,
};

use crate::screen::ScreenId;

/// One managed-list request, numbered by the screen that issued it.
///
/// Results carry their ticket back so a screen can drop a table that is
/// older than the one it already shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    pub kind: ListKind,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,

    // ── Navigation ──
    SwitchScreen(ScreenId),
    NextScreen,
    PrevScreen,
    ToggleHelp,

    // ── Telemetry ──
    /// A view's table was replaced by the poller.
    TelemetryUpdated(NodeKind, TableSnapshot),

    // ── Admin forms ──
    /// Run a form action with the input's current text.
    Submit(Trigger, String),
    /// A form action finished.
    Submitted(Trigger, Feedback),

    // ── Managed lists ──
    RefreshList(ListTicket),
    ListLoaded(ListTicket, Result<ListTable, Feedback>),
    /// Delete exactly this row; its value is what gets sent.
    DeleteEntry(ListTicket, ListRow),
    EntryDeleted(ListTicket, DeleteOutcome),

    // ── Feedback modal ──
    DismissFeedback,
}
