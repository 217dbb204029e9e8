// Admin API response types
//
// Every admin endpoint wraps its payload in a `{code, msg, data}` envelope.
// Node telemetry fields default liberally: a dead node carries nothing but
// its address, and older node builds omit the optional buffer metrics.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard admin API response envelope.
///
/// ```json
/// { "code": 0, "msg": "optional", "data": ... }
/// ```
///
/// `code == 0` means success; any other value is a failure whose `msg`
/// is diagnostic only.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success code written by the backend.
    pub const SUCCESS: i64 = 0;

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

// ── Node kinds ───────────────────────────────────────────────────────

/// The two monitored fleets. The lowercase name is the `type` query value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    Crawler,
    Indexer,
}

impl NodeKind {
    /// Both kinds, in display order.
    pub const ALL: [NodeKind; 2] = [NodeKind::Crawler, NodeKind::Indexer];
}

// ── Running time ─────────────────────────────────────────────────────

/// Node uptime as reported on the wire.
///
/// Nodes report either a pre-formatted string or a number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunningTime {
    Seconds(u64),
    Text(String),
}

// ── Crawler ──────────────────────────────────────────────────────────

/// Telemetry of an alive crawler node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerStats {
    /// Total memory in bytes.
    pub mem_total: u64,
    /// Memory usage as a fraction in `0..=1`.
    pub mem_percent: f64,
    /// CPU usage, already a percentage.
    pub cpu_percent: f64,
    pub running_time: Option<RunningTime>,
    pub crawled_count: u64,
    pub failure_count: u64,
    /// Failed fetches as a fraction in `0..=1`.
    pub failure_rate: f64,
}

/// One crawler node from `/admin/monitor?type=crawler`.
///
/// Exactly one of `dead` and `stats` is meaningful: a dead node never
/// carries stats, even when the server echoed stale fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCrawlerNode")]
pub struct CrawlerNode {
    pub addr: String,
    pub dead: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CrawlerStats>,
}

#[derive(Deserialize)]
struct RawCrawlerNode {
    #[serde(default)]
    addr: String,
    #[serde(default)]
    dead: bool,
    #[serde(flatten)]
    stats: CrawlerStats,
}

impl From<RawCrawlerNode> for CrawlerNode {
    fn from(raw: RawCrawlerNode) -> Self {
        Self {
            addr: raw.addr,
            dead: raw.dead,
            stats: (!raw.dead).then_some(raw.stats),
        }
    }
}

// ── Indexer ──────────────────────────────────────────────────────────

/// Telemetry of an alive indexer node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerStats {
    pub mem_total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_used: Option<u64>,
    pub mem_percent: f64,
    pub cpu_percent: f64,
    pub running_time: Option<RunningTime>,
    /// On-disk index size in bytes.
    pub index_size: u64,
    pub indexed_doc_count: u64,
    pub token_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postings_buffer_hit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_docs_count_buffer_hit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url_buffer_hit_rate: Option<f64>,
}

/// One indexer node from `/admin/monitor?type=indexer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawIndexerNode")]
pub struct IndexerNode {
    pub addr: String,
    pub dead: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub stats: Option<IndexerStats>,
}

#[derive(Deserialize)]
struct RawIndexerNode {
    #[serde(default)]
    addr: String,
    #[serde(default)]
    dead: bool,
    #[serde(flatten)]
    stats: IndexerStats,
}

impl From<RawIndexerNode> for IndexerNode {
    fn from(raw: RawIndexerNode) -> Self {
        Self {
            addr: raw.addr,
            dead: raw.dead,
            stats: (!raw.dead).then_some(raw.stats),
        }
    }
}

// ── Tagged node ──────────────────────────────────────────────────────

/// A node of either fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeInfo {
    Crawler(CrawlerNode),
    Indexer(IndexerNode),
}

impl NodeInfo {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Crawler(_) => NodeKind::Crawler,
            Self::Indexer(_) => NodeKind::Indexer,
        }
    }

    pub fn addr(&self) -> &str {
        match self {
            Self::Crawler(n) => &n.addr,
            Self::Indexer(n) => &n.addr,
        }
    }

    pub fn is_dead(&self) -> bool {
        match self {
            Self::Crawler(n) => n.dead,
            Self::Indexer(n) => n.dead,
        }
    }
}

// ── List mutations ───────────────────────────────────────────────────

/// `opType` value for the blacklist and keyword mutation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ListOp {
    Add,
    Del,
}
