#![allow(clippy::unwrap_used)]
// Integration tests for `AdminActions` against a wiremock backend.

use std::sync::{Arc, Mutex};

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use searchctl_core::admin::{OPERATION_FAILED, OPERATION_SUCCEEDED};
use searchctl_core::{AdminActions, AdminClient, FeedbackLevel, ListKind, Trigger};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, AdminActions) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = AdminClient::with_client(reqwest::Client::new(), base_url);
    (server, AdminActions::new(Arc::new(client)))
}

fn ok_empty() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 0 }))
}

fn fail() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 1, "msg": "参数错误" }))
}

/// In-memory list backend: applies `opType` mutations and serves reads.
#[derive(Clone, Default)]
struct ListBackend {
    field: &'static str,
    entries: Arc<Mutex<Vec<String>>>,
    deleted: Arc<Mutex<Vec<String>>>,
}

impl ListBackend {
    fn with_entries(field: &'static str, entries: &[&str]) -> Self {
        Self {
            field,
            entries: Arc::new(Mutex::new(entries.iter().map(ToString::to_string).collect())),
            deleted: Arc::default(),
        }
    }

    fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

struct Mutate(ListBackend);
struct Read(ListBackend);

impl Respond for Mutate {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let form: Vec<(String, String)> = url::form_urlencoded::parse(&request.body)
            .into_owned()
            .collect();
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        let value = get(self.0.field);
        let mut entries = self.0.entries.lock().unwrap();
        match get("opType").as_str() {
            "add" => {
                if !entries.contains(&value) {
                    entries.push(value);
                }
            }
            "del" => {
                entries.retain(|e| e != &value);
                self.0.deleted.lock().unwrap().push(value);
            }
            _ => return fail(),
        }
        ok_empty()
    }
}

impl Respond for Read {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let entries = self.0.entries.lock().unwrap().clone();
        ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "data": entries }))
    }
}

async fn mount_blacklist(server: &MockServer, backend: &ListBackend) {
    Mock::given(method("POST"))
        .and(path("/admin/manage_domain_blacklist"))
        .respond_with(Mutate(backend.clone()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/get_domain_blacklist"))
        .respond_with(Read(backend.clone()))
        .mount(server)
        .await;
}

async fn mount_keywords(server: &MockServer, backend: &ListBackend) {
    Mock::given(method("POST"))
        .and(path("/admin/manage_illegal_keyword"))
        .respond_with(Mutate(backend.clone()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/get_illegal_keyword"))
        .respond_with(Read(backend.clone()))
        .mount(server)
        .await;
}

// ── Form action tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_include_domain_success_clears_field() {
    let (server, actions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/include_domain"))
        .and(body_string("domain=example.com%2C+example.org"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;

    let mut field = String::from("  example.com, example.org ");
    let feedback = actions.submit(Trigger::IncludeDomain, &mut field).await;

    assert_eq!(feedback.level, FeedbackLevel::Success);
    assert_eq!(feedback.message, Trigger::IncludeDomain.success_message());
    assert!(field.is_empty());
}

#[tokio::test]
async fn test_include_domain_failure_keeps_field() {
    let (server, actions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/include_domain"))
        .respond_with(fail())
        .mount(&server)
        .await;

    let mut field = String::from("example.com, example.org");
    let feedback = actions.submit(Trigger::IncludeDomain, &mut field).await;

    assert_eq!(feedback.level, FeedbackLevel::Failure);
    assert_eq!(feedback.message, Trigger::IncludeDomain.failure_message());
    assert_eq!(field, "example.com, example.org");
}

#[tokio::test]
async fn test_transport_failure_is_reported_like_rejection() {
    let (server, actions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/manage_illegal_keyword"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut field = String::from("casino");
    let feedback = actions.submit(Trigger::AddKeyword, &mut field).await;

    assert!(!feedback.is_success());
    assert_eq!(feedback.message, Trigger::AddKeyword.failure_message());
    assert_eq!(field, "casino");
}

#[tokio::test]
async fn test_add_keyword_sends_trimmed_value() {
    let (server, actions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/manage_illegal_keyword"))
        .and(body_string("keyword=casino&opType=add"))
        .respond_with(ok_empty())
        .expect(1)
        .mount(&server)
        .await;

    let feedback = actions.execute(Trigger::AddKeyword, "\tcasino \n").await;
    assert!(feedback.is_success());
}

// ── List tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_blacklist_round_trip() {
    let (server, actions) = setup().await;
    let backend = ListBackend::with_entries("domain", &["old.com"]);
    mount_blacklist(&server, &backend).await;

    let feedback = actions
        .execute(Trigger::BlacklistDomain, " spam.com ")
        .await;
    assert!(feedback.is_success());

    let table = actions.refresh_list(ListKind::DomainBlacklist).await.unwrap();
    let hits = table.rows.iter().filter(|r| r.value == "spam.com").count();
    assert_eq!(hits, 1);

    let row = table.rows.iter().find(|r| r.value == "spam.com").unwrap();
    let outcome = actions.delete_entry(ListKind::DomainBlacklist, row).await;
    assert_eq!(outcome.feedback.message, OPERATION_SUCCEEDED);

    let refreshed = outcome.refreshed.unwrap().unwrap();
    assert!(refreshed.rows.iter().all(|r| r.value != "spam.com"));
    assert_eq!(refreshed.len(), 1);
}

#[tokio::test]
async fn test_delete_targets_the_activated_row() {
    let (server, actions) = setup().await;
    let backend = ListBackend::with_entries("keyword", &["first", "second", "third"]);
    mount_keywords(&server, &backend).await;

    let table = actions.refresh_list(ListKind::IllegalKeywords).await.unwrap();
    let activated = table.row(1).unwrap();
    let outcome = actions.delete_entry(ListKind::IllegalKeywords, activated).await;

    assert!(outcome.feedback.is_success());
    assert_eq!(backend.deleted(), vec!["second".to_string()]);

    let refreshed = outcome.refreshed.unwrap().unwrap();
    let values: Vec<_> = refreshed.rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["first", "third"]);
}

#[tokio::test]
async fn test_failed_delete_skips_refresh() {
    let (server, actions) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/manage_domain_blacklist"))
        .respond_with(fail())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/get_domain_blacklist"))
        .respond_with(ok_empty())
        .expect(0)
        .mount(&server)
        .await;

    let row = searchctl_core::ListRow {
        key: 0,
        value: "keep.com".into(),
    };
    let outcome = actions.delete_entry(ListKind::DomainBlacklist, &row).await;

    assert_eq!(outcome.feedback.message, OPERATION_FAILED);
    assert!(outcome.refreshed.is_none());
}

#[tokio::test]
async fn test_refresh_failure_yields_generic_feedback() {
    let (server, actions) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/get_illegal_keyword"))
        .respond_with(fail())
        .mount(&server)
        .await;

    let err = actions
        .refresh_list(ListKind::IllegalKeywords)
        .await
        .unwrap_err();
    assert_eq!(err.level, FeedbackLevel::Failure);
    assert_eq!(err.message, OPERATION_FAILED);
}
