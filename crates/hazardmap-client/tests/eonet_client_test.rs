//! Integration tests for the EONET client
//!
//! Each test serves one canned HTTP response from a local listener and checks
//! how the client decodes it.

use hazardmap_client::EonetClient;
use hazardmap_core::error::HazardError;
use hazardmap_core::models::{EventFilter, Limit, StatusFilter};
use hazardmap_core::ports::EventSource;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single response; the handle resolves to the request head
async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/api/v3", listener.local_addr().unwrap());

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });

    (base_url, handle)
}

#[tokio::test]
async fn test_fetch_categories() {
    let body = r#"{"title": "EONET Categories", "categories": [{"id": 8, "title": "Wildfires"}, {"id": 10, "title": "Severe Storms"}]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let client = EonetClient::new(base_url).unwrap();
    let categories = client.fetch_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, 8);
    assert_eq!(categories[1].display_title(), "Severe Storms");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/v3/categories "));
    assert!(request.to_lowercase().contains("accept: application/json"));
}

#[tokio::test]
async fn test_fetch_events_sends_filter() {
    let body = r#"{"events": [{"id": "EONET_1", "title": "Fire", "status": "open", "geometry": []}]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let client = EonetClient::new(base_url).unwrap();
    let filter = EventFilter {
        status: Some(StatusFilter::Open),
        limit: Limit::new(25).unwrap(),
        category_ids: [8, 12].into_iter().collect(),
    };
    let events = client.fetch_events(&filter).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id.as_deref(), Some("EONET_1"));

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /api/v3/events?"));
    assert!(request_line.contains("status=open"));
    assert!(request_line.contains("limit=25"));
    assert!(request_line.contains("category=8%2C12"));
}

#[tokio::test]
async fn test_missing_events_field_is_empty() {
    let (base_url, _server) = serve_once("200 OK", r#"{"title": "EONET Events"}"#).await;

    let client = EonetClient::new(base_url).unwrap();
    let events = client.fetch_events(&EventFilter::default()).await.unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let (base_url, _server) = serve_once("503 Service Unavailable", "upstream down").await;

    let client = EonetClient::new(base_url).unwrap();
    let err = client.fetch_categories().await.unwrap_err();

    match err {
        HazardError::Api { status, ref body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "API error 503: upstream down");
}

#[tokio::test]
async fn test_empty_error_body_uses_reason_phrase() {
    let (base_url, _server) = serve_once("404 Not Found", "").await;

    let client = EonetClient::new(base_url).unwrap();
    let err = client.fetch_events(&EventFilter::default()).await.unwrap_err();

    assert_eq!(err.to_string(), "API error 404: Not Found");
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let (base_url, _server) = serve_once("200 OK", "{not json").await;

    let client = EonetClient::new(base_url).unwrap();
    let err = client.fetch_categories().await.unwrap_err();

    assert!(matches!(err, HazardError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EonetClient::new(format!("http://{}/api/v3", addr)).unwrap();
    let err = client.fetch_categories().await.unwrap_err();

    assert!(matches!(err, HazardError::Transport(_)));
}
