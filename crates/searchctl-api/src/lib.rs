// searchctl-api: Async Rust client for the search engine admin HTTP API

pub mod admin;
pub mod error;
pub mod transport;

pub use admin::models::{
    CrawlerNode, CrawlerStats, Envelope, IndexerNode, IndexerStats, ListOp, NodeInfo, NodeKind,
    RunningTime,
};
pub use admin::AdminClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
