//! HTTP Provider Tests
//!
//! Runs the HTTP provider against a local mock upstream.

use lkf_common::AlertLevel;
use lkf_provider::{DataProvider, HttpProvider, HttpProviderConfig, ProviderError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn snapshot_json() -> serde_json::Value {
    serde_json::json!({
        "stations": [
            {
                "id": "nagalagam-street",
                "name": "Nagalagam Street",
                "river": "Kelani Ganga",
                "basin": "Kelani Ganga",
                "district": "Colombo",
                "latitude": 6.9497,
                "longitude": 79.8612,
                "normal_level": 2.0,
                "warning_level": 5.0,
                "danger_level": 6.0
            },
            {
                "id": "baddegama",
                "name": "Baddegama",
                "river": "Gin Ganga",
                "basin": "Gin Ganga",
                "district": "Galle",
                "latitude": 6.1535,
                "longitude": 80.1210,
                "normal_level": 1.5,
                "warning_level": 4.0,
                "danger_level": 5.0
            }
        ],
        "readings": [
            { "station_id": "nagalagam-street", "level": 6.4, "timestamp": "2025-11-29T06:00:00Z" },
            { "station_id": "baddegama", "level": 2.1, "timestamp": "2025-11-29T06:00:00Z" }
        ]
    })
}

async fn provider_for(server: &MockServer) -> HttpProvider {
    HttpProvider::new(HttpProviderConfig {
        url: format!("{}/snapshot.json", server.uri()),
        ..HttpProviderConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetches_and_derives_views() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/snapshot.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_json()))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;

    let stations = provider.stations().await.unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].alert_level, AlertLevel::Danger);

    let alerts = provider.alerts().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].station_id, "nagalagam-street");

    let river = provider.river("gin-ganga").await.unwrap().unwrap();
    assert_eq!(river.stations_count, 1);
    assert_eq!(river.alert_level, AlertLevel::Normal);
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/snapshot.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.levels().await.unwrap_err();

    match err {
        ProviderError::UpstreamStatus { status, url } => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/snapshot.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/snapshot.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    assert!(provider.basins().await.is_err());
}

async fn expect_single_fetch() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/snapshot.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_json()))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_station_history_fetches_once() {
    let server = expect_single_fetch().await;
    let provider = provider_for(&server).await;

    let history = provider.station_history("baddegama", 7).await.unwrap().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].level, 2.1);
    server.verify().await;
}

#[tokio::test]
async fn test_unknown_station_history_fetches_once() {
    let server = expect_single_fetch().await;
    let provider = provider_for(&server).await;

    assert!(provider.station_history("kitulgala", 7).await.unwrap().is_none());
    server.verify().await;
}

#[tokio::test]
async fn test_river_stations_fetches_once() {
    let server = expect_single_fetch().await;
    let provider = provider_for(&server).await;

    let stations = provider.river_stations("kelani-ganga").await.unwrap().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].station.id, "nagalagam-street");
    server.verify().await;
}

#[tokio::test]
async fn test_basin_rivers_fetches_once() {
    let server = expect_single_fetch().await;
    let provider = provider_for(&server).await;

    let rivers = provider.basin_rivers("gin-ganga").await.unwrap().unwrap();
    assert_eq!(rivers.len(), 1);
    assert_eq!(rivers[0].id, "gin-ganga");
    server.verify().await;
}
