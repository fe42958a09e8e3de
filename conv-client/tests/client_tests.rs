#![allow(clippy::unwrap_used)]
//! Integration tests for `ConversionClient` against a mock conversion service.

use std::fs;
use std::path::Path;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use conv_client::{ClientConfig, ConversionClient, ConversionError};
use conv_core::{SubmissionInput, ValidatedSubmission};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn client_for(server: &MockServer) -> ConversionClient {
    let config = ClientConfig::new(&format!("{}/convert", server.uri())).unwrap();
    ConversionClient::new(config).unwrap()
}

fn submission(source: &str, format: &str, delimiter: &str, dest: &Path) -> ValidatedSubmission {
    SubmissionInput {
        source_file_name: source.to_owned(),
        destination_path: dest.display().to_string(),
        output_format: format.to_owned(),
        delimiter: delimiter.to_owned(),
        key: "s3cret".to_owned(),
    }
    .validate()
    .unwrap()
}

fn success(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": STANDARD.encode(content) }))
}

async fn single_request_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    String::from_utf8(requests[0].body.clone()).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Request shape
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_submit_sends_all_fields_with_delimiter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert"))
        .and(body_string_contains("name=\"documentType\""))
        .respond_with(success("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = client_for(&server);
    let sub = submission("orders.csv", "json", ";", tmp.path());
    client.submit(&sub, b"id;name\n1;a\n".to_vec()).await.unwrap();

    let body = single_request_body(&server).await;
    assert!(body.contains("name=\"file\"; filename=\"orders.csv\""));
    assert!(body.contains("id;name\n1;a\n"));
    assert!(body.contains("name=\"key\"\r\n\r\ns3cret"));
    assert!(body.contains("name=\"documentType\"\r\n\r\njson"));
    assert!(body.contains("name=\"pathFile\""));
    assert!(body.contains("name=\"delimiter\"\r\n\r\n;"));
}

#[tokio::test]
async fn test_submit_omits_delimiter_for_structured_conversion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(success("<root/>"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = client_for(&server);
    let sub = submission("orders.json", "xml", "", tmp.path());
    let conversion = client.submit(&sub, b"{}".to_vec()).await.unwrap();
    assert_eq!(conversion.text(), "<root/>");

    let body = single_request_body(&server).await;
    assert!(!body.contains("name=\"delimiter\""));
    assert!(body.contains("name=\"documentType\"\r\n\r\nxml"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_convert_saves_result_next_to_destination() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(success("{\"id\":1}"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = client_for(&server);
    let sub = submission("orders.csv", "json", ",", tmp.path());
    let saved = client.convert(&sub, b"id\n1\n".to_vec()).await.unwrap();

    assert_eq!(saved.path, tmp.path().join("orders_converted.json"));
    assert_eq!(fs::read_to_string(&saved.path).unwrap(), "{\"id\":1}");
    assert_eq!(saved.conversion.text(), "{\"id\":1}");
}

#[tokio::test]
async fn test_server_error_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Invalid key length",
            "errors": ["key must be 16 characters"]
        })))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = client_for(&server);
    let sub = submission("orders.csv", "txt", ",", tmp.path());
    let err = client.submit(&sub, b"x".to_vec()).await.unwrap_err();

    match &err {
        ConversionError::Server {
            status,
            message,
            errors,
        } => {
            assert_eq!(*status, 422);
            assert_eq!(message, "Invalid key length");
            assert_eq!(errors, &vec!["key must be 16 characters".to_owned()]);
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert!(err.to_string().contains("key must be 16 characters"));
    assert!(!client.is_busy());
}

#[tokio::test]
async fn test_missing_destination_is_partial_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(success("a,b"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("not-there");
    let client = client_for(&server);
    let sub = submission("data.txt", "csv", ",", &missing);
    let err = client.convert(&sub, b"a b".to_vec()).await.unwrap_err();

    assert!(err.is_partial_success());
    match err {
        ConversionError::Save { content, path, .. } => {
            assert_eq!(content, b"a,b");
            assert_eq!(path, missing.join("data_converted.csv"));
        }
        other => panic!("expected save error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ConversionClient::new(
        ClientConfig::new(&format!("http://127.0.0.1:{port}/convert"))
            .unwrap()
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let tmp = TempDir::new().unwrap();
    let sub = submission("a.csv", "json", ",", tmp.path());
    let err = client.submit(&sub, b"x".to_vec()).await.unwrap_err();
    assert!(matches!(err, ConversionError::Transport(_)), "got {err:?}");
    assert!(!client.is_busy());
}

// ─────────────────────────────────────────────────────────────────────────────
// Single request in flight
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_second_submit_while_in_flight_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(success("ok").set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = client_for(&server);
    let sub = submission("a.csv", "txt", ",", tmp.path());

    let (first, second) = tokio::join!(
        client.submit(&sub, b"1".to_vec()),
        client.submit(&sub, b"2".to_vec())
    );

    assert_eq!(first.unwrap().text(), "ok");
    assert!(matches!(second, Err(ConversionError::Busy)));
    assert!(!client.is_busy());

    // Released after completion: a new request goes through.
    server.reset().await;
    Mock::given(method("POST"))
        .respond_with(success("again"))
        .mount(&server)
        .await;
    assert_eq!(
        client.submit(&sub, b"3".to_vec()).await.unwrap().text(),
        "again"
    );
}
