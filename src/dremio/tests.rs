//! Tests for the Dremio module

use super::*;
use crate::config::DremioConfig;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DremioClient {
    DremioClient::new(&DremioConfig::new(server.uri(), "test-pat")).unwrap()
}

fn fast_poll(timeout_ms: u64) -> PollConfig {
    PollConfig {
        timeout: Duration::from_millis(timeout_ms),
        interval: Duration::from_millis(5),
    }
}

async fn mount_job_state(server: &MockServer, job_id: &str, body: Value, times: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path(format!("/api/v3/job/{job_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body));
    match times {
        Some(n) => mock.up_to_n_times(n).mount(server).await,
        None => mock.mount(server).await,
    }
}

fn rows(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| json!({"id": i, "name": format!("row-{i}")}))
        .collect()
}

fn schema() -> Value {
    json!([{"name": "id", "type": {"name": "BIGINT"}}, {"name": "name", "type": {"name": "VARCHAR"}}])
}

// ============================================================================
// Job state
// ============================================================================

#[test_case("COMPLETED", JobState::Completed ; "completed")]
#[test_case("FAILED", JobState::Failed ; "failed")]
#[test_case("CANCELED", JobState::Canceled ; "canceled")]
#[test_case("RUNNING", JobState::Running ; "running")]
#[test_case("PLANNING", JobState::Submitted ; "planning")]
#[test_case("ENGINE_START", JobState::Submitted ; "engine start")]
#[test_case("CANCELLATION_REQUESTED", JobState::Submitted ; "cancellation requested")]
#[test_case("SOMETHING_NEW", JobState::Unknown("SOMETHING_NEW".to_string()) ; "unknown")]
fn test_job_state_from_server(raw: &str, expected: JobState) {
    assert_eq!(JobState::from_server(raw), expected);
}

#[test]
fn test_job_snapshot_defaults() {
    let snapshot = JobSnapshot::from_response("j1", JobStatusResponse::default());
    assert_eq!(snapshot.state_name, "UNKNOWN");
    assert_eq!(snapshot.row_count, 0);
    assert!(!snapshot.state.is_terminal());
}

// ============================================================================
// Submit / poll
// ============================================================================

#[tokio::test]
async fn test_submit_posts_statement_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/sql"))
        .and(header("Authorization", "Bearer test-pat"))
        .and(body_json(json!({"sql": "SELECT * FROM space.view"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job-42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let job_id = QueryRunner::new(&client)
        .submit("SELECT * FROM space.view")
        .await
        .unwrap();

    assert_eq!(job_id, "job-42");
}

#[tokio::test]
async fn test_submit_surfaces_server_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/sql"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessage": "Object 'nope' not found within 'space'"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .submit("SELECT * FROM space.nope")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to submit query (HTTP 400): Object 'nope' not found within 'space'"
    );
}

#[tokio::test]
async fn test_await_completion_after_pending_states() {
    let server = MockServer::start().await;

    mount_job_state(&server, "j1", json!({"jobState": "PLANNING"}), Some(1)).await;
    mount_job_state(&server, "j1", json!({"jobState": "RUNNING"}), Some(2)).await;
    mount_job_state(&server, "j1", json!({"jobState": "COMPLETED", "rowCount": 7}), None).await;

    let client = client_for(&server);
    let job = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(5_000))
        .await
        .unwrap();

    assert_eq!(job.state, JobState::Completed);
    assert_eq!(job.row_count, 7);
    let polls = server.received_requests().await.unwrap().len();
    assert_eq!(polls, 4);
}

#[tokio::test]
async fn test_await_completion_failed_with_message() {
    let server = MockServer::start().await;
    mount_job_state(
        &server,
        "j1",
        json!({"jobState": "FAILED", "errorMessage": "Division by zero"}),
        None,
    )
    .await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(1_000))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Query failed: Division by zero");
}

#[tokio::test]
async fn test_await_completion_failed_without_message() {
    let server = MockServer::start().await;
    mount_job_state(&server, "j1", json!({"jobState": "FAILED"}), None).await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(1_000))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JobFailed { ref message } if message == "Unknown error"));
}

#[tokio::test]
async fn test_await_completion_canceled() {
    let server = MockServer::start().await;
    mount_job_state(&server, "j1", json!({"jobState": "RUNNING"}), Some(1)).await;
    mount_job_state(&server, "j1", json!({"jobState": "CANCELED"}), None).await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(1_000))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JobCanceled));
}

#[tokio::test]
async fn test_await_completion_times_out_with_last_state() {
    let server = MockServer::start().await;
    mount_job_state(&server, "j1", json!({"jobState": "RUNNING"}), None).await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(50))
        .await
        .unwrap_err();

    match err {
        Error::JobTimeout { state, .. } => assert_eq!(state, "RUNNING"),
        other => panic!("Expected JobTimeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_await_completion_unknown_state_keeps_polling() {
    let server = MockServer::start().await;
    mount_job_state(&server, "j1", json!({}), None).await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(30))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JobTimeout { ref state, .. } if state == "UNKNOWN"));
    assert!(server.received_requests().await.unwrap().len() > 1);
}

#[tokio::test]
async fn test_await_completion_zero_timeout() {
    let server = MockServer::start().await;
    mount_job_state(&server, "done", json!({"jobState": "COMPLETED", "rowCount": 1}), None).await;
    mount_job_state(&server, "busy", json!({"jobState": "RUNNING"}), None).await;

    let client = client_for(&server);
    let runner = QueryRunner::new(&client);

    // Terminal state wins over an already-expired deadline
    let job = runner.await_completion("done", &fast_poll(0)).await.unwrap();
    assert_eq!(job.state, JobState::Completed);

    let err = runner.await_completion("busy", &fast_poll(0)).await.unwrap_err();
    assert!(matches!(err, Error::JobTimeout { ref state, .. } if state == "RUNNING"));
}

#[tokio::test]
async fn test_await_completion_status_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/job/j1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .await_completion("j1", &fast_poll(1_000))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to check job status (HTTP 500): boom");
}

// ============================================================================
// Pagination
// ============================================================================

async fn mount_page(server: &MockServer, offset: u64, limit: u64, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/job/j1/results"))
        .and(query_param("offset", offset.to_string()))
        .and(query_param("limit", limit.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_all_pages_exact_row_count() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 500, json!({"rowCount": 1200, "schema": schema(), "rows": rows(0, 500)})).await;
    mount_page(&server, 500, 500, json!({"rowCount": 1200, "rows": rows(500, 500)})).await;
    mount_page(&server, 1000, 500, json!({"rowCount": 1200, "rows": rows(1000, 200)})).await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 1200, 500)
        .await
        .unwrap();

    assert_eq!(columns, vec!["id", "name"]);
    assert_eq!(records.len(), 1200);
    assert_eq!(records[0]["id"], 0);
    assert_eq!(records[1199]["id"], 1199);
}

#[tokio::test]
async fn test_fetch_all_pages_row_count_is_page_multiple() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 2, json!({"schema": schema(), "rows": rows(0, 2)})).await;
    mount_page(&server, 2, 2, json!({"rows": rows(2, 2)})).await;

    let client = client_for(&server);
    let (_, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 4, 2)
        .await
        .unwrap();

    // No request beyond offset row_count - 1
    assert_eq!(records.len(), 4);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_all_pages_stops_on_short_page() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 500, json!({"schema": schema(), "rows": rows(0, 120)})).await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 5000, 500)
        .await
        .unwrap();

    assert_eq!(columns.len(), 2);
    assert_eq!(records.len(), 120);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_all_pages_keeps_first_schema() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 1, json!({"schema": schema(), "rows": rows(0, 1)})).await;
    mount_page(&server, 1, 1, json!({"schema": [{"name": "other"}], "rows": rows(1, 1)})).await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 2, 1)
        .await
        .unwrap();

    assert_eq!(columns, vec!["id", "name"]);
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_fetch_all_pages_schema_from_later_page() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 1, json!({"rows": rows(0, 1)})).await;
    mount_page(&server, 1, 1, json!({"schema": schema(), "rows": rows(1, 1)})).await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 2, 1)
        .await
        .unwrap();

    assert_eq!(columns, vec!["id", "name"]);
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_fetch_all_pages_infers_columns_in_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/job/j1/results"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "500"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"rows":[{"zeta":1,"alpha":2,"mid":3}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 1, 500)
        .await
        .unwrap();

    assert_eq!(columns, vec!["zeta", "alpha", "mid"]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["alpha"], json!(2));
}

#[tokio::test]
async fn test_fetch_all_pages_error_is_fatal() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 1, json!({"schema": schema(), "rows": rows(0, 1)})).await;
    Mock::given(method("GET"))
        .and(path("/api/v3/job/j1/results"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = QueryRunner::new(&client)
        .fetch_all_pages("j1", 3, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_fetch_all_pages_zero_rows_recovers_schema() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 1, json!({"rowCount": 0, "schema": schema(), "rows": []})).await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 0, 500)
        .await
        .unwrap();

    assert_eq!(columns, vec!["id", "name"]);
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_all_pages_zero_rows_swallows_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/job/j1/results"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not ready"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 0, 500)
        .await
        .unwrap();

    assert!(columns.is_empty());
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_all_pages_zero_rows_discards_stray_rows() {
    let server = MockServer::start().await;

    mount_page(&server, 0, 1, json!({"schema": schema(), "rows": rows(0, 1)})).await;

    let client = client_for(&server);
    let (columns, records) = QueryRunner::new(&client)
        .fetch_all_pages("j1", 0, 500)
        .await
        .unwrap();

    assert_eq!(columns.len(), 2);
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_all_pages_rejects_zero_page_size() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = QueryRunner::new(&client)
        .fetch_all_pages("j1", 10, 0)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
}

#[tokio::test]
async fn test_run_materializes_table() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/sql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "j1"})))
        .mount(&server)
        .await;
    mount_job_state(&server, "j1", json!({"jobState": "COMPLETED", "rowCount": 3}), None).await;
    mount_page(
        &server,
        0,
        2,
        json!({"schema": schema(), "rows": [{"id": 1, "name": "a"}, {"name": "b", "id": 2, "extra": 9}]}),
    )
    .await;
    mount_page(&server, 2, 2, json!({"rows": [{"id": 3}]})).await;

    let client = client_for(&server);
    let result = QueryRunner::new(&client)
        .with_page_size(2)
        .run("SELECT * FROM s.v", &fast_poll(1_000))
        .await
        .unwrap();

    assert_eq!(result.job_id, "j1");
    assert_eq!(result.row_count, 3);
    assert_eq!(result.table.columns, vec!["id", "name"]);
    assert_eq!(
        result.table.rows,
        vec![
            vec![json!(1), json!("a")],
            vec![json!(2), json!("b")],
            vec![json!(3), Value::Null],
        ]
    );
}

// ============================================================================
// Catalog
// ============================================================================

#[test_case("a.b", &["a", "b"] ; "dotted")]
#[test_case("a/b", &["a", "b"] ; "slashes")]
#[test_case("/a//b/", &["a", "b"] ; "slashes with empty segments")]
#[test_case(" 'My Space' / \"x.y\" ", &["My Space", "x.y"] ; "slashes trim quotes")]
#[test_case("\"A B\".\"C.D\"", &["A B", "C.D"] ; "quoted segments")]
#[test_case("space.\"folder.v1\".view", &["space", "folder.v1", "view"] ; "mixed quoting")]
#[test_case("a..b", &["a", "b"] ; "empty dotted segment dropped")]
fn test_catalog_path_parse(input: &str, expected: &[&str]) {
    let path = CatalogPath::parse(input).unwrap();
    assert_eq!(path.segments(), expected);
}

#[test_case("" ; "empty")]
#[test_case("..." ; "only dots")]
#[test_case("//" ; "only slashes")]
#[test_case("\"\"" ; "empty quotes")]
fn test_catalog_path_rejects_empty(input: &str) {
    assert!(matches!(CatalogPath::parse(input), Err(Error::InvalidPath { .. })));
}

#[test]
fn test_catalog_path_display() {
    let path: CatalogPath = "\"A B\".\"C\"".parse().unwrap();
    assert_eq!(path.to_string(), "A B.C");
}

fn item(value: Value) -> CatalogItem {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_catalog_entry_classification() {
    let view = CatalogEntry::from_item(&item(json!({
        "path": ["s", "v"], "type": "DATASET", "datasetType": "VIRTUAL"
    })))
    .unwrap();
    assert_eq!(view.kind, EntryKind::View);
    assert_eq!(view.name, "v");
    assert_eq!(view.path, "s.v");

    let promoted = CatalogEntry::from_item(&item(json!({
        "path": ["src", "t"], "type": "DATASET", "datasetType": "PROMOTED"
    })))
    .unwrap();
    assert_eq!(promoted.kind.label(), "PROMOTED");

    let dataset = CatalogEntry::from_item(&item(json!({"path": ["t"], "type": "DATASET"}))).unwrap();
    assert_eq!(dataset.kind.label(), "DATASET");

    let container = CatalogEntry::from_item(&item(json!({
        "name": "home", "type": "CONTAINER"
    })))
    .unwrap();
    assert_eq!(container.kind, EntryKind::Container("CONTAINER".to_string()));
    assert_eq!(container.path, "home");
    assert_eq!(container.segments, vec!["home"]);

    assert!(CatalogEntry::from_item(&item(json!({"path": ["f"], "type": "FILE"}))).is_none());
}

#[test]
fn test_by_path_url_encodes_segments() {
    let client =
        DremioClient::new(&DremioConfig::new("http://dremio.local:9047/", "pat")).unwrap();
    let url = client
        .by_path_url(&["My Space".to_string(), "a/b".to_string(), "v.1".to_string()])
        .unwrap();

    assert_eq!(
        url.as_str(),
        "http://dremio.local:9047/api/v3/catalog/by-path/My%20Space/a%2Fb/v.1"
    );
}

#[tokio::test]
async fn test_list_root_non_recursive() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"path": ["Sales"], "type": "CONTAINER", "containerType": "SPACE"},
                {"path": ["@admin"], "type": "CONTAINER", "containerType": "HOME"},
                {"path": ["top_view"], "type": "DATASET", "datasetType": "VIRTUAL"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entries = CatalogNavigator::new(&client).list(None, false).await.unwrap();

    let summary: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.path.as_str(), e.kind.label()))
        .collect();
    assert_eq!(
        summary,
        vec![("Sales", "SPACE"), ("@admin", "HOME"), ("top_view", "VIEW")]
    );
}

#[tokio::test]
async fn test_list_recursive_depth_first_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/catalog/by-path/My%20Space"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "children": [
                {"path": ["My Space", "first"], "type": "DATASET", "datasetType": "VIRTUAL"},
                {"path": ["My Space", "folder.v2"], "type": "CONTAINER", "containerType": "FOLDER"},
                {"path": ["My Space", "last"], "type": "DATASET", "datasetType": "VIRTUAL"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/catalog/by-path/My%20Space/folder.v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "children": [
                {"path": ["My Space", "folder.v2", "nested"], "type": "CONTAINER", "containerType": "FOLDER"},
                {"path": ["My Space", "folder.v2", "table"], "type": "DATASET", "datasetType": "PROMOTED"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/catalog/by-path/My%20Space/folder.v2/nested"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "children": [
                {"path": ["My Space", "folder.v2", "nested", "deep"], "type": "DATASET", "datasetType": "VIRTUAL"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let path = CatalogPath::parse("\"My Space\"").unwrap();
    let entries = CatalogNavigator::new(&client)
        .list(Some(&path), true)
        .await
        .unwrap();

    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "My Space.first",
            "My Space.folder.v2.nested.deep",
            "My Space.folder.v2.table",
            "My Space.last",
        ]
    );
}

#[tokio::test]
async fn test_list_unknown_path_reports_catalog_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/catalog/by-path/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorMessage": "Could not find entity with path [[nope]]"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let path = CatalogPath::parse("nope").unwrap();
    let err = CatalogNavigator::new(&client)
        .list(Some(&path), false)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Could not find 'nope' in catalog (HTTP 404): Could not find entity with path [[nope]]"
    );
}

#[test]
fn test_search_statement_escapes_keyword() {
    assert_eq!(
        search_statement("O'Brien"),
        "SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_TYPE FROM INFORMATION_SCHEMA.\"TABLES\" \
         WHERE LOWER(TABLE_NAME) LIKE '%o''brien%' OR LOWER(TABLE_SCHEMA) LIKE '%o''brien%' \
         ORDER BY TABLE_SCHEMA, TABLE_NAME"
    );
}

#[tokio::test]
async fn test_search_maps_rows_to_entries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/sql"))
        .and(body_json(json!({"sql": search_statement("Sales")})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "search-1"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_job_state(&server, "search-1", json!({"jobState": "COMPLETED", "rowCount": 3}), None).await;
    Mock::given(method("GET"))
        .and(path("/api/v3/job/search-1/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schema": [{"name": "TABLE_SCHEMA"}, {"name": "TABLE_NAME"}, {"name": "TABLE_TYPE"}],
            "rows": [
                {"TABLE_SCHEMA": "Sales.reports", "TABLE_NAME": "daily", "TABLE_TYPE": "VIEW"},
                {"TABLE_SCHEMA": "lake", "TABLE_NAME": "sales_raw", "TABLE_TYPE": "TABLE"},
                {"TABLE_SCHEMA": "", "TABLE_NAME": "sales_top", "TABLE_TYPE": "SYSTEM_TABLE"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entries = CatalogNavigator::new(&client)
        .search("Sales", &fast_poll(1_000))
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].path, "Sales.reports.daily");
    assert_eq!(entries[0].kind, EntryKind::View);
    assert_eq!(entries[0].segments, vec!["Sales", "reports", "daily"]);
    assert_eq!(entries[1].kind.label(), "TABLE");
    assert_eq!(entries[2].path, "sales_top");
    assert_eq!(entries[2].name, "sales_top");
}
