use neo_feed::config::RequestConfig;
use neo_feed::error::FeedError;
use neo_feed::fetch::{BasicClient, fetch_today};
use neo_feed::output::{OutputFormat, map_all, report};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const SAMPLE: &str = include_str!("fixtures/feed_sample.json");

/// Serves one canned HTTP response on a loopback port and hands back the
/// raw request head it received.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
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
        // the client may hang up early on error statuses
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&head).into_owned()
    });

    (format!("http://{addr}/neo/rest/v1/feed"), handle)
}

fn config_for(url: &str, date: &str) -> RequestConfig {
    RequestConfig::new("TEST_KEY", date)
        .unwrap()
        .with_url(url)
        .unwrap()
        .with_timeout(Duration::from_secs(5))
}

fn client() -> BasicClient {
    BasicClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_and_report_full_pipeline() {
    let (url, server) = serve_once("200 OK", SAMPLE).await;
    let config = config_for(&url, "2024-01-01");

    let objects = fetch_today(&client(), &config).await.unwrap();
    assert_eq!(objects.len(), 2);

    let mut out = Vec::new();
    let records = report(&objects, OutputFormat::Json, &mut out).unwrap();

    assert_eq!(records[0].id, "2415949");
    assert_eq!(records[0].name, "415949 (2001 XY10)");
    assert!(records[0].potentially_hazardous);
    assert_eq!(records[0].close_approach_date_time, "2024-Jan-01 03:53");
    assert_eq!(records[0].miss_distance_km, 48880636.43723);
    assert_eq!(records[0].absolute_magnitude_h, 19.9);
    assert_eq!(records[0].diameter_m, 494.19081);
    assert_eq!(records[0].velocity_kmph, 55953.7869);

    assert_eq!(records[1].id, "3092269");
    assert!(!records[1].potentially_hazardous);
    assert_eq!(records[1].miss_distance_km, 13648507.66667);
    assert_eq!(records[1].diameter_m, 64.37381);
    assert_eq!(records[1].velocity_kmph, 30244.44444);

    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed.as_array().unwrap().len(), 2);
    assert_eq!(printed[1]["URL"], records[1].url.as_str());

    server.await.unwrap();
}

#[tokio::test]
async fn test_request_shape() {
    let (url, server) = serve_once("200 OK", SAMPLE).await;
    let config = config_for(&url, "2024-01-01");

    fetch_today(&client(), &config).await.unwrap();
    let head = server.await.unwrap();
    let request_line = head.lines().next().unwrap();

    assert_eq!(
        request_line,
        "GET /neo/rest/v1/feed?api_key=TEST_KEY&start_date=2024-01-01&end_date=2024-01-01 HTTP/1.1"
    );
    let lower = head.to_ascii_lowercase();
    assert!(lower.contains("content-type: application/json"));
    assert!(lower.contains("accept: application/json"));
}

#[tokio::test]
async fn test_forbidden_is_fatal_transport_error() {
    let body = r#"{"error":{"code":"API_KEY_INVALID","message":"An invalid api_key was supplied."}}"#;
    let (url, server) = serve_once("403 Forbidden", body).await;
    let config = config_for(&url, "2024-01-01");

    let err = fetch_today(&client(), &config).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.url(), Some(url.as_str()));
    match &err {
        FeedError::HttpStatus { status, .. } => assert_eq!(*status, StatusCode::FORBIDDEN),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(err.to_string().contains(&url));
    assert!(!err.to_string().contains("TEST_KEY"));

    server.await.unwrap();
}

#[tokio::test]
async fn test_empty_day_reports_empty_collection() {
    let body = r#"{"element_count":0,"near_earth_objects":{"2024-07-04":[]}}"#;
    let (url, server) = serve_once("200 OK", body).await;
    let config = config_for(&url, "2024-07-04");

    let objects = fetch_today(&client(), &config).await.unwrap();
    let mut out = Vec::new();
    report(&objects, OutputFormat::Pretty, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[]\n");

    server.await.unwrap();
}

#[tokio::test]
async fn test_wrong_day_is_data_shape_error() {
    let (url, server) = serve_once("200 OK", SAMPLE).await;
    let config = config_for(&url, "2024-01-02");

    let err = fetch_today(&client(), &config).await.unwrap_err();
    assert!(err.is_data_shape());
    assert!(matches!(err, FeedError::MissingDate { ref date } if date == "2024-01-02"));

    server.await.unwrap();
}

#[test]
fn test_fixture_maps_idempotently() {
    let objects = neo_feed::parser::parse_feed(SAMPLE.as_bytes(), "2024-01-01").unwrap();
    assert_eq!(map_all(&objects).unwrap(), map_all(&objects).unwrap());
}
