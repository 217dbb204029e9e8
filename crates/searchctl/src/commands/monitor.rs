//! Telemetry handler: one-shot fetch or `--watch` through the poller.

use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use searchctl_core::view::{self, NodeRow};
use searchctl_core::{
    AdminClient, CoreError, NodeInfo, NodeKind, PanelConfig, Poller, TableSnapshot,
    ViewSelection,
};

use crate::cli::{GlobalOpts, MonitorArgs, MonitorTarget, OutputFormat};
use crate::error::CliError;
use crate::output;

fn selection(target: MonitorTarget) -> ViewSelection {
    match target {
        MonitorTarget::Crawler => ViewSelection::only(NodeKind::Crawler),
        MonitorTarget::Indexer => ViewSelection::only(NodeKind::Indexer),
        MonitorTarget::All => ViewSelection::ALL,
    }
}

fn heading(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Crawler => "Crawlers",
        NodeKind::Indexer => "Indexers",
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// One fleet's nodes, ready for any output format.
struct Fleet<'a> {
    kind: NodeKind,
    nodes: &'a [NodeInfo],
    rows: &'a [NodeRow],
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    crawler: Option<&'a [NodeInfo]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indexer: Option<&'a [NodeInfo]>,
}

fn render_fleet(fleet: &Fleet<'_>, format: &OutputFormat) -> Result<String, CliError> {
    let cells: Vec<Vec<String>> = fleet.rows.iter().map(NodeRow::cells).collect();
    output::render_grid(
        format,
        fleet.nodes,
        &view::columns(fleet.kind),
        &cells,
        || {
            fleet
                .rows
                .iter()
                .map(|r| format!("{}\t{}", r.addr, r.status))
                .collect()
        },
    )
}

fn section(kind: NodeKind, body: &str) -> String {
    format!("{}\n{body}", heading(kind))
}

fn render_fleets(fleets: &[Fleet<'_>], format: &OutputFormat) -> Result<String, CliError> {
    match (format, fleets) {
        (_, [single]) => render_fleet(single, format),
        (OutputFormat::Table, _) => {
            let mut sections = Vec::with_capacity(fleets.len());
            for fleet in fleets {
                sections.push(section(fleet.kind, &render_fleet(fleet, format)?));
            }
            Ok(sections.join("\n\n"))
        }
        (OutputFormat::Plain, _) => {
            let mut lines = Vec::new();
            for fleet in fleets {
                lines.push(render_fleet(fleet, format)?);
            }
            Ok(lines.into_iter().filter(|l| !l.is_empty()).collect::<Vec<_>>().join("\n"))
        }
        (structured, _) => {
            let find = |kind| fleets.iter().find(|f| f.kind == kind).map(|f| f.nodes);
            let report = Report {
                crawler: find(NodeKind::Crawler),
                indexer: find(NodeKind::Indexer),
            };
            output::render_structured(structured, &report)
        }
    }
}

/// Render the watched views that have a table. Views still waiting for
/// their first successful poll are marked pending in table output and
/// left out of the others. `None` until at least one view has loaded.
fn render_watch(
    snapshots: &[(NodeKind, TableSnapshot)],
    format: &OutputFormat,
) -> Result<Option<String>, CliError> {
    let fleets: Vec<Fleet<'_>> = snapshots
        .iter()
        .filter(|(_, snap)| snap.is_loaded())
        .map(|(kind, snap)| Fleet {
            kind: *kind,
            nodes: &snap.nodes,
            rows: &snap.rows,
        })
        .collect();
    if fleets.is_empty() {
        return Ok(None);
    }

    if matches!(format, OutputFormat::Table) && snapshots.len() > 1 {
        let mut sections = Vec::with_capacity(snapshots.len());
        for (kind, _) in snapshots {
            let body = match fleets.iter().find(|f| f.kind == *kind) {
                Some(fleet) => render_fleet(fleet, format)?,
                None => "waiting for data…".to_owned(),
            };
            sections.push(section(*kind, &body));
        }
        return Ok(Some(sections.join("\n\n")));
    }
    render_fleets(&fleets, format).map(Some)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: Arc<AdminClient>,
    panel: &PanelConfig,
    args: MonitorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let selection = selection(args.target);

    if args.watch {
        let period = args
            .interval
            .map_or(panel.poll_interval, Duration::from_millis);
        if period.is_zero() {
            return Err(CliError::Validation {
                field: "interval".into(),
                reason: "must be greater than zero".into(),
            });
        }
        return watch_loop(client, selection, period, global).await;
    }

    let mut fetched = Vec::new();
    for kind in NodeKind::ALL {
        if selection.is_active(kind) {
            let nodes = client.monitor(kind).await.map_err(CoreError::from)?;
            let rows = view::render_nodes(&nodes);
            fetched.push((kind, nodes, rows));
        }
    }

    let fleets: Vec<Fleet<'_>> = fetched
        .iter()
        .map(|(kind, nodes, rows)| Fleet {
            kind: *kind,
            nodes,
            rows,
        })
        .collect();
    let out = render_fleets(&fleets, &global.output)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Poll until Ctrl-C, redrawing whenever a table is replaced.
async fn watch_loop(
    client: Arc<AdminClient>,
    selection: ViewSelection,
    period: Duration,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (_selection_tx, selection_rx) = watch::channel(selection);
    let handle = Poller::new(client, selection_rx, period).start_selected();
    let mut crawler_rx = handle.tables().subscribe(NodeKind::Crawler);
    let mut indexer_rx = handle.tables().subscribe(NodeKind::Indexer);

    let clear = matches!(global.output, OutputFormat::Table) && std::io::stdout().is_terminal();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = crawler_rx.changed(), if selection.crawler => {
                if changed.is_err() { break; }
            }
            changed = indexer_rx.changed(), if selection.indexer => {
                if changed.is_err() { break; }
            }
        }

        let snapshots: Vec<(NodeKind, TableSnapshot)> = NodeKind::ALL
            .into_iter()
            .filter(|&kind| selection.is_active(kind))
            .map(|kind| (kind, handle.tables().snapshot(kind)))
            .collect();
        // One document per line while streaming.
        let format = match global.output {
            OutputFormat::Json => &OutputFormat::JsonCompact,
            ref other => other,
        };
        let Some(out) = render_watch(&snapshots, format)? else {
            continue;
        };

        if clear {
            let mut stdout = std::io::stdout().lock();
            let _ = write!(stdout, "\x1b[2J\x1b[H");
            let stamp = snapshots
                .iter()
                .filter_map(|(_, snap)| snap.fetched_at)
                .max()
                .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
                .unwrap_or_default();
            let _ = writeln!(
                stdout,
                "Every {}ms · updated {stamp} · Ctrl-C to quit\n",
                period.as_millis()
            );
        }
        output::print_output(&out, global.quiet);
    }

    handle.shutdown().await;
    Ok(())
}
