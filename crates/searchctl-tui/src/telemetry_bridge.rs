//! Forwards telemetry table replacements from the poller into the action loop.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use searchctl_core::{NodeKind, TelemetryTables};

use crate::action::Action;

/// Run until cancelled or until the app stops listening.
///
/// The current tables are pushed first so a tab switch never shows an
/// empty view when data already exists.
pub async fn run(
    tables: TelemetryTables,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut crawler = tables.subscribe(NodeKind::Crawler);
    let mut indexer = tables.subscribe(NodeKind::Indexer);

    for kind in NodeKind::ALL {
        let _ = action_tx.send(Action::TelemetryUpdated(kind, tables.snapshot(kind)));
    }

    loop {
        let (kind, snapshot) = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = crawler.changed() => {
                if changed.is_err() { break; }
                (NodeKind::Crawler, crawler.borrow_and_update().clone())
            }
            changed = indexer.changed() => {
                if changed.is_err() { break; }
                (NodeKind::Indexer, indexer.borrow_and_update().clone())
            }
        };

        if action_tx
            .send(Action::TelemetryUpdated(kind, snapshot))
            .is_err()
        {
            break;
        }
    }
    debug!("telemetry bridge stopped");
}
