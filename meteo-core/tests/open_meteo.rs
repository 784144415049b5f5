//! Integration tests for OpenMeteoProvider using wiremock.

use std::time::Duration;

use meteo_core::{
    Config, Coordinates, FetchError, LocationRegistry, OpenMeteoProvider, WeatherProvider,
    render_current, render_daily,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PARIS: Coordinates = Coordinates { lat: 48.85, lon: 2.35 };

fn paris_body() -> serde_json::Value {
    serde_json::json!({
        "current": {
            "temperature_2m": 20,
            "apparent_temperature": 19,
            "relative_humidity_2m": 55,
            "is_day": 0
        },
        "daily": {
            "weather_code": [0],
            "time": ["2024-01-01"]
        }
    })
}

fn provider_for(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(format!("{}/v1/forecast", server.uri()))
}

#[tokio::test]
async fn test_fetch_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param(
            "current",
            "temperature_2m,apparent_temperature,relative_humidity_2m,is_day",
        ))
        .and(query_param("daily", "weather_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = provider_for(&mock_server).fetch(&PARIS).await.unwrap();

    assert!(snapshot.is_complete());
    let current = snapshot.current.as_ref().unwrap();
    assert_eq!(current.temperature_c, Some(20.0));
    assert_eq!(current.is_day, Some(0));
}

#[tokio::test]
async fn test_paris_scenario_renders_expected_text() {
    let mock_server = MockServer::start().await;
    let api_url = format!("{}/v1/forecast", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        format!(
            r#"{{"api_url":"{api_url}","default_locations":{{"Paris":{{"lat":48.85,"lon":2.35}}}},"favorites":[]}}"#
        ),
    )
    .unwrap();

    let registry = LocationRegistry::load(&config_path).unwrap();
    let paris = registry.resolve("paris").unwrap();
    let provider = meteo_core::provider_from_config(registry.config());

    let snapshot = provider.fetch(&paris.coordinates).await.unwrap();

    let current = render_current(&paris.name, &snapshot);
    assert!(current.contains("20°C"), "{current}");
    assert!(current.contains("Day"), "{current}");

    let daily = render_daily(&snapshot);
    assert!(daily.contains("Today (2024-01-01): Clear sky"), "{daily}");
}

#[tokio::test]
async fn test_missing_daily_yields_empty_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temperature_2m": 20 }
        })))
        .mount(&mock_server)
        .await;

    let snapshot = provider_for(&mock_server).fetch(&PARIS).await.unwrap();

    assert!(!snapshot.is_complete());
    assert!(snapshot.current.is_none());
    assert!(snapshot.daily.is_none());
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).fetch(&PARIS).await.unwrap_err();

    match err {
        FetchError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal failure");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).fetch(&PARIS).await.unwrap_err();

    assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_server_is_timeout_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paris_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::builder().timeout(Duration::from_millis(100)).build().unwrap();
    let provider =
        OpenMeteoProvider::with_client(format!("{}/v1/forecast", mock_server.uri()), http);

    let err = provider.fetch(&PARIS).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let cfg = Config::new(format!("http://127.0.0.1:{port}/v1/forecast"));
    let provider = meteo_core::provider_from_config(&cfg);

    let err = provider.fetch(&PARIS).await.unwrap_err();

    assert!(matches!(err, FetchError::Connection(_)), "got {err:?}");
}
