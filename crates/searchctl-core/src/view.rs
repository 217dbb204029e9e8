//! Display rows for the telemetry tables.
//!
//! Each [`NodeInfo`] becomes one [`NodeRow`] with a fixed column order per
//! fleet. Dead nodes keep their address and a `dead` status; every other
//! cell is empty.

use serde::Serialize;
use strum::{Display, EnumString};

use searchctl_api::{CrawlerNode, IndexerNode, NodeInfo, NodeKind};

use crate::format::{fraction_percent, human_readable_size, percent, running_time};

/// Leading columns shared by both tables.
pub const IDENTITY_COLUMNS: [&str; 2] = ["Address", "Status"];

/// Metric columns of the crawler table, in display order.
pub const CRAWLER_METRIC_COLUMNS: [&str; 7] = [
    "Memory",
    "Mem %",
    "CPU %",
    "Running Time",
    "Crawled",
    "Failures",
    "Failure Rate",
];

/// Metric columns of the indexer table, in display order.
pub const INDEXER_METRIC_COLUMNS: [&str; 7] = [
    "Memory",
    "Mem %",
    "CPU %",
    "Running Time",
    "Index Size",
    "Documents",
    "Tokens",
];

/// Liveness shown in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    Alive,
    Dead,
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRow {
    pub kind: NodeKind,
    pub addr: String,
    pub status: NodeStatus,
    /// Aligned with [`metric_columns`] for `kind`.
    pub metrics: Vec<String>,
}

impl NodeRow {
    /// Every cell in column order, identity columns first.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(IDENTITY_COLUMNS.len() + self.metrics.len());
        cells.push(self.addr.clone());
        cells.push(self.status.to_string());
        cells.extend(self.metrics.iter().cloned());
        cells
    }

    pub fn is_dead(&self) -> bool {
        self.status == NodeStatus::Dead
    }
}

pub fn metric_columns(kind: NodeKind) -> &'static [&'static str] {
    match kind {
        NodeKind::Crawler => &CRAWLER_METRIC_COLUMNS,
        NodeKind::Indexer => &INDEXER_METRIC_COLUMNS,
    }
}

/// Full header row for a fleet's table.
pub fn columns(kind: NodeKind) -> Vec<&'static str> {
    IDENTITY_COLUMNS
        .iter()
        .chain(metric_columns(kind))
        .copied()
        .collect()
}

fn dead_row(kind: NodeKind, addr: &str) -> NodeRow {
    NodeRow {
        kind,
        addr: addr.to_owned(),
        status: NodeStatus::Dead,
        metrics: vec![String::new(); metric_columns(kind).len()],
    }
}

fn crawler_row(node: &CrawlerNode) -> NodeRow {
    let Some(stats) = node.stats.as_ref().filter(|_| !node.dead) else {
        return dead_row(NodeKind::Crawler, &node.addr);
    };
    NodeRow {
        kind: NodeKind::Crawler,
        addr: node.addr.clone(),
        status: NodeStatus::Alive,
        metrics: vec![
            human_readable_size(stats.mem_total),
            fraction_percent(stats.mem_percent),
            percent(stats.cpu_percent),
            stats.running_time.as_ref().map(running_time).unwrap_or_default(),
            stats.crawled_count.to_string(),
            stats.failure_count.to_string(),
            fraction_percent(stats.failure_rate),
        ],
    }
}

fn indexer_row(node: &IndexerNode) -> NodeRow {
    let Some(stats) = node.stats.as_ref().filter(|_| !node.dead) else {
        return dead_row(NodeKind::Indexer, &node.addr);
    };
    NodeRow {
        kind: NodeKind::Indexer,
        addr: node.addr.clone(),
        status: NodeStatus::Alive,
        metrics: vec![
            human_readable_size(stats.mem_total),
            fraction_percent(stats.mem_percent),
            percent(stats.cpu_percent),
            stats.running_time.as_ref().map(running_time).unwrap_or_default(),
            human_readable_size(stats.index_size),
            stats.indexed_doc_count.to_string(),
            stats.token_count.to_string(),
        ],
    }
}

/// Format a single node.
pub fn render_node(node: &NodeInfo) -> NodeRow {
    match node {
        NodeInfo::Crawler(n) => crawler_row(n),
        NodeInfo::Indexer(n) => indexer_row(n),
    }
}

/// Format a poll response, one row per node, order preserved.
pub fn render_nodes(nodes: &[NodeInfo]) -> Vec<NodeRow> {
    nodes.iter().map(render_node).collect()
}
