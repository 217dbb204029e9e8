// Node telemetry endpoints
//
// `/admin/monitor?type=crawler|indexer` returns one record per registered
// node of that fleet.

use tracing::debug;
use url::Url;

use crate::admin::AdminClient;
use crate::admin::models::{CrawlerNode, IndexerNode, NodeInfo, NodeKind};
use crate::error::Error;

impl AdminClient {
    fn monitor_url(&self, kind: NodeKind) -> Result<Url, Error> {
        let mut url = self.admin_url("monitor")?;
        url.query_pairs_mut().append_pair("type", kind.as_ref());
        Ok(url)
    }

    /// Fetch telemetry for every crawler node.
    pub async fn crawler_nodes(&self) -> Result<Vec<CrawlerNode>, Error> {
        let url = self.monitor_url(NodeKind::Crawler)?;
        let nodes: Vec<CrawlerNode> = self.get(url).await?.unwrap_or_default();
        debug!(count = nodes.len(), "fetched crawler telemetry");
        Ok(nodes)
    }

    /// Fetch telemetry for every indexer node.
    pub async fn indexer_nodes(&self) -> Result<Vec<IndexerNode>, Error> {
        let url = self.monitor_url(NodeKind::Indexer)?;
        let nodes: Vec<IndexerNode> = self.get(url).await?.unwrap_or_default();
        debug!(count = nodes.len(), "fetched indexer telemetry");
        Ok(nodes)
    }

    /// Fetch telemetry for one fleet as tagged nodes.
    pub async fn monitor(&self, kind: NodeKind) -> Result<Vec<NodeInfo>, Error> {
        Ok(match kind {
            NodeKind::Crawler => self
                .crawler_nodes()
                .await?
                .into_iter()
                .map(NodeInfo::Crawler)
                .collect(),
            NodeKind::Indexer => self
                .indexer_nodes()
                .await?
                .into_iter()
                .map(NodeInfo::Indexer)
                .collect(),
        })
    }
}
