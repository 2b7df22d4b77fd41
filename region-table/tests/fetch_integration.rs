//! Integration tests for region fetching
//!
//! These tests run a mock HTTP server standing in for the REAPER web
//! interface and fetch real responses from it.

use mockito::Server;
use region_table::{FetchConfig, FetchError, RegionFetcher, REGION_PATH};
use std::net::TcpListener;

const REGION_DUMP: &str = "REGION_LIST\n\
REGION\tIntro\t1\t0\t16\t16777471\n\
REGION\tVerse\t2\t16\t48\t33488896\n\
REGION\tVerse\t3\t48\t80\t0\n\
REGION_LIST_END";

fn config_for(server: &Server) -> FetchConfig {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port
        .rsplit_once(':')
        .expect("mock server address has a port");
    FetchConfig::new(host, port.parse().expect("numeric port"))
}

#[tokio::test]
async fn test_fetch_parses_region_dump() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", REGION_PATH)
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(REGION_DUMP)
        .create_async()
        .await;

    let fetcher = RegionFetcher::new(&config_for(&server)).unwrap();
    let regions = fetcher.refresh().await.expect("fetch should succeed");

    mock.assert_async().await;
    assert_eq!(regions.len(), 3);
    assert_eq!(regions.get("Intro").unwrap().start, Some(0));
    assert_eq!(regions.get("Verse").unwrap().color, "33488896");
    assert_eq!(regions.get("Verse 3").unwrap().end, Some(80));
}

#[tokio::test]
async fn test_fetch_empty_body_yields_empty_table() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", REGION_PATH)
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let fetcher = RegionFetcher::new(&config_for(&server)).unwrap();
    let regions = fetcher.refresh().await.unwrap();

    assert!(regions.is_empty());
}

#[tokio::test]
async fn test_fetch_reports_http_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", REGION_PATH)
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let fetcher = RegionFetcher::new(&config_for(&server)).unwrap();
    let result = fetcher.refresh().await;

    assert!(matches!(result, Err(FetchError::Status(404))));
}

#[tokio::test]
async fn test_fetch_reports_connection_failure() {
    // Reserve a port, then free it so nothing is listening there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = RegionFetcher::new(&FetchConfig::new("127.0.0.1", port)).unwrap();
    let result = fetcher.refresh().await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}
