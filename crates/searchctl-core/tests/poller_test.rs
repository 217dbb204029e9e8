#![allow(clippy::unwrap_used)]
// Integration tests for `Poller` against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use searchctl_core::{AdminClient, NodeKind, NodeStatus, Poller, ViewSelection};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(
    selection: ViewSelection,
    period: Duration,
) -> (MockServer, Poller, watch::Sender<ViewSelection>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = Arc::new(AdminClient::with_client(reqwest::Client::new(), base_url));
    let (tx, rx) = watch::channel(selection);
    let poller = Poller::new(client, rx, period);
    (server, poller, tx)
}

fn nodes(addrs: &[&str]) -> ResponseTemplate {
    let data: Vec<_> = addrs
        .iter()
        .map(|addr| {
            json!({
                "addr": addr,
                "mem_total": 2048,
                "mem_percent": 0.25,
                "cpu_percent": 3.0,
                "running_time": 60,
                "crawled_count": 10,
                "failure_count": 1,
                "failure_rate": 0.1
            })
        })
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "data": data }))
}

fn monitor(kind: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path("/admin/monitor"))
        .and(query_param("type", kind))
}

// ── refresh_info tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_forced_refresh_fetches_every_view() {
    let (server, poller, _tx) = setup(ViewSelection::NONE, Duration::from_secs(5)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).expect(1).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1", "i2"])).expect(1).mount(&server).await;

    let tick = poller.refresh_info(true);
    assert_eq!(tick.request_count(), 2);
    tick.join().await;

    let tables = poller.tables();
    let crawler = tables.snapshot(NodeKind::Crawler);
    assert!(crawler.is_loaded());
    assert_eq!(crawler.rows.len(), 1);
    assert_eq!(crawler.rows[0].status, NodeStatus::Alive);
    assert_eq!(crawler.rows[0].metrics[0], "2.00 KB");
    assert_eq!(tables.snapshot(NodeKind::Indexer).rows.len(), 2);
}

#[tokio::test]
async fn test_no_active_view_means_no_requests() {
    let (server, poller, _tx) = setup(ViewSelection::NONE, Duration::from_secs(5)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).expect(0).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1"])).expect(0).mount(&server).await;

    for _ in 0..3 {
        let tick = poller.refresh_info(false);
        assert_eq!(tick.request_count(), 0);
        tick.join().await;
    }
    assert!(!poller.tables().snapshot(NodeKind::Crawler).is_loaded());
}

#[tokio::test]
async fn test_selection_is_read_on_every_tick() {
    let (server, poller, tx) =
        setup(ViewSelection::only(NodeKind::Crawler), Duration::from_secs(5)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).expect(1).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1"])).expect(1).mount(&server).await;

    let tick = poller.refresh_info(false);
    assert_eq!(tick.kinds(), &[NodeKind::Crawler]);
    tick.join().await;

    tx.send(ViewSelection::only(NodeKind::Indexer)).unwrap();
    let tick = poller.refresh_info(false);
    assert_eq!(tick.kinds(), &[NodeKind::Indexer]);
    tick.join().await;
}

#[tokio::test]
async fn test_failure_code_keeps_previous_table() {
    let (server, poller, _tx) =
        setup(ViewSelection::only(NodeKind::Crawler), Duration::from_secs(5)).await;
    monitor("crawler")
        .respond_with(nodes(&["c1", "c2"]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    monitor("crawler")
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 1, "msg": "not logged in" })),
        )
        .mount(&server)
        .await;

    poller.refresh_info(false).join().await;
    let before = poller.tables().snapshot(NodeKind::Crawler);
    assert_eq!(before.rows.len(), 2);

    poller.refresh_info(false).join().await;
    let after = poller.tables().snapshot(NodeKind::Crawler);
    assert_eq!(after.seq, before.seq);
    assert_eq!(after.rows.len(), 2);
}

#[tokio::test]
async fn test_late_response_from_older_tick_is_discarded() {
    let (server, poller, _tx) =
        setup(ViewSelection::only(NodeKind::Crawler), Duration::from_secs(5)).await;
    monitor("crawler")
        .respond_with(nodes(&["slow-a"]).set_delay(Duration::from_millis(400)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    monitor("crawler")
        .respond_with(nodes(&["fast-b"]))
        .mount(&server)
        .await;

    let tick_a = poller.refresh_info(false);
    tokio::time::sleep(Duration::from_millis(100)).await;
    let tick_b = poller.refresh_info(false);
    assert!(tick_b.seq > tick_a.seq);

    tick_b.join().await;
    let snap = poller.tables().snapshot(NodeKind::Crawler);
    assert_eq!(snap.rows[0].addr, "fast-b");

    tick_a.join().await;
    let snap = poller.tables().snapshot(NodeKind::Crawler);
    assert_eq!(snap.rows.len(), 1);
    assert_eq!(snap.rows[0].addr, "fast-b");
    assert_eq!(snap.seq, 2);
}

#[tokio::test]
async fn test_subscribers_see_table_replacement() {
    let (server, poller, _tx) = setup(ViewSelection::ALL, Duration::from_secs(5)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1"])).mount(&server).await;

    let mut rx = poller.tables().subscribe(NodeKind::Indexer);
    poller.refresh_info(false);

    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rx.borrow().rows[0].addr, "i1");
}

// ── Lifecycle tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_start_forces_first_refresh_then_polls_only_active_views() {
    let (server, poller, _tx) = setup(ViewSelection::NONE, Duration::from_millis(50)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1"])).mount(&server).await;

    let handle = poller.start();
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert!(handle.tables().snapshot(NodeKind::Crawler).is_loaded());
    assert!(handle.tables().snapshot(NodeKind::Indexer).is_loaded());
    handle.shutdown().await;
}

#[tokio::test]
async fn test_start_selected_skips_inactive_views() {
    let (server, poller, _tx) =
        setup(ViewSelection::only(NodeKind::Crawler), Duration::from_millis(50)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1"])).expect(0).mount(&server).await;

    let handle = poller.start_selected();
    tokio::time::sleep(Duration::from_millis(180)).await;

    assert!(handle.tables().snapshot(NodeKind::Crawler).is_loaded());
    assert!(!handle.tables().snapshot(NodeKind::Indexer).is_loaded());
    handle.shutdown().await;
}

#[tokio::test]
async fn test_stopped_poller_issues_no_more_requests() {
    let (server, poller, _tx) = setup(ViewSelection::ALL, Duration::from_millis(40)).await;
    monitor("crawler").respond_with(nodes(&["c1"])).mount(&server).await;
    monitor("indexer").respond_with(nodes(&["i1"])).mount(&server).await;

    let handle = poller.start();
    tokio::time::sleep(Duration::from_millis(150)).await;
    handle.stop();
    assert!(handle.is_stopped());
    handle.shutdown().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let seen = server.received_requests().await.unwrap().len();
    assert!(seen >= 4, "expected forced refresh plus at least one tick, saw {seen}");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(server.received_requests().await.unwrap().len(), seen);
}
