//! Pipeline integration tests against mock HTTP services.
//!
//! Run-level properties: a denied gate performs no network activity;
//! a successful pass resolves the city and sets the forecast from
//! exactly one fetch; any mid-pipeline failure collapses into a
//! single `Failed` event.

use std::sync::mpsc;

use serde_json::json;
use skycast_core::forecast::OpenWeatherProvider;
use skycast_core::location::{IpLocator, Permission, ReverseGeocoder};
use skycast_core::pipeline::{self, BoardEvent, Services};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_services(server: &MockServer) -> Services {
    Services {
        locator: IpLocator::with_base_url(format!("{}/json", server.uri())),
        geocoder: ReverseGeocoder::with_base_url(format!("{}/reverse", server.uri()))
            .expect("geocoder client must build"),
        provider: Box::new(OpenWeatherProvider::with_base_url(
            "TESTKEY".to_string(),
            server.uri(),
        )),
    }
}

async fn mount_position(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 50.45,
            "lon": 30.52,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn denied_gate_performs_no_requests() {
    let server = MockServer::start().await;
    let services = mock_services(&server);
    let (tx, rx) = mpsc::channel();

    pipeline::run(Permission::Denied, &services, &tx).await;

    assert!(rx.try_recv().is_err(), "denied runs must emit no events");
    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "denied runs must not touch the network"
    );
}

#[tokio::test]
async fn successful_pass_sets_forecast_from_exactly_one_fetch() {
    let server = MockServer::start().await;
    mount_position(&server).await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": { "city": "Kyiv" },
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/onecall"))
        .and(query_param("appid", "TESTKEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": [
                {
                    "dt": 1672704000,
                    "temp": { "day": 21.6 },
                    "weather": [{ "main": "Clear", "description": "clear sky" }],
                },
                {
                    "dt": 1672790400,
                    "temp": { "day": 18.2 },
                    "weather": [{ "main": "Mist", "description": "mist" }],
                },
            ],
        })))
        .mount(&server)
        .await;

    let services = mock_services(&server);
    let (tx, rx) = mpsc::channel();

    pipeline::run(Permission::Granted, &services, &tx).await;

    match rx.try_recv().expect("city event must arrive first") {
        BoardEvent::City(city) => assert_eq!(city, "Kyiv"),
        other => panic!("expected City, got {other:?}"),
    }

    match rx.try_recv().expect("forecast event must follow") {
        BoardEvent::Forecast(days) => {
            assert_eq!(days.len(), 2);
            assert_eq!(days[0].category, "Clear");
            assert!((days[0].temp_day_c - 21.6).abs() < f64::EPSILON);
            assert_eq!(days[1].description, "mist");
        }
        other => panic!("expected Forecast, got {other:?}"),
    }

    assert!(rx.try_recv().is_err(), "no further events expected");

    let onecall_hits = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|req| req.url.path() == "/data/2.5/onecall")
        .count();
    assert_eq!(onecall_hits, 1, "the forecast must come from one fetch");
}

#[tokio::test]
async fn position_failure_collapses_into_one_failed_event() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "private range",
        })))
        .mount(&server)
        .await;

    let services = mock_services(&server);
    let (tx, rx) = mpsc::channel();

    pipeline::run(Permission::Granted, &services, &tx).await;

    match rx.try_recv().expect("a failure event must arrive") {
        BoardEvent::Failed(message) => assert!(message.contains("private range")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn non_success_forecast_status_fails_the_pass() {
    let server = MockServer::start().await;
    mount_position(&server).await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": { "town": "Bila Tserkva" },
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/onecall"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
        )
        .mount(&server)
        .await;

    let services = mock_services(&server);
    let (tx, rx) = mpsc::channel();

    pipeline::run(Permission::Granted, &services, &tx).await;

    // The city still resolves before the fetch fails.
    match rx.try_recv().expect("city event must arrive") {
        BoardEvent::City(city) => assert_eq!(city, "Bila Tserkva"),
        other => panic!("expected City, got {other:?}"),
    }

    match rx.try_recv().expect("a failure event must follow") {
        BoardEvent::Failed(message) => assert!(message.contains("401")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(rx.try_recv().is_err());
}
