//! Integration tests for the VVO client (wiremock-based)

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clap::Parser;
use dvb_route::cli::{Cli, run};
use dvb_route::domain::{DvbTime, Mot, StopId};
use dvb_route::query::{Output, QueryError, RouteQuery, run_route_query};
use dvb_route::vvo::{
    StatusCode, VvoClient, VvoConfig, VvoError, changes, monitor, point, route, trip,
};

const TRIPS_JSON: &str = include_str!("../data/mock/trips.json");

fn client_for(server: &MockServer) -> VvoClient {
    VvoClient::new(VvoConfig::new().with_base_url(server.uri()).with_timeout(5)).unwrap()
}

fn stop(id: &str) -> StopId {
    StopId::parse(id).unwrap()
}

fn fixed_time() -> DvbTime {
    DvbTime::parse("/Date(1609459200000+0100)/").unwrap()
}

#[tokio::test]
async fn test_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .and(body_partial_json(json!({
            "origin": "33000742",
            "destination": "33000037",
            "time": "/Date(1609459200000+0100)/",
            "isarrivaltime": false,
            "shorttermchanges": true,
            "format": "json",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (origin, destination) = (stop("33000742"), stop("33000037"));
    let params = route::Params::new(&origin, &destination, fixed_time(), false);

    let response = client.route(&params).await.unwrap();

    assert!(response.status.is_ok());
    assert_eq!(response.routes.len(), 3);
    assert_eq!(response.session_id.as_deref(), Some("367417461:efa4"));

    let first = &response.routes[0];
    assert_eq!(first.duration, Some(14));
    assert_eq!(first.mot_chain[0].r#type, Some(Mot::Tram));
    assert_eq!(first.partial_routes[1].regular_stops[2].name.as_deref(), Some("Postplatz"));
}

#[tokio::test]
async fn test_route_via_in_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .and(body_partial_json(json!({ "via": "33000028", "isarrivaltime": true })))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (origin, destination, via) = (stop("33000742"), stop("33000037"), stop("33000028"));
    let params = route::Params::new(&origin, &destination, fixed_time(), true).with_via(&via);

    client.route(&params).await.unwrap();
}

#[tokio::test]
async fn test_run_route_query_writes_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = RouteQuery::default_at(fixed_time());
    let mut out = Vec::new();

    run_route_query(&client, &query, Output::default(), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("SessionId").count(), 1);
    assert!(text.contains("... 1 more item"));
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn test_run_route_query_prints_payload_as_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "ExpirationTime": "/Date(1609459500000+0100)/",
            "Routes": [{
                "ExtraCharge": "None",
                "Price": 2.3,
                "MotChain": [{ "Type": "PlusBus" }],
                "PartialRoutes": [{
                    "RegularStops": [{ "Latitude": 5655904, "DepartureState": "Early" }]
                }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = RouteQuery::default_at(fixed_time());
    let mut out = Vec::new();

    run_route_query(&client, &query, Output::Json, &mut out)
        .await
        .unwrap();

    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        printed,
        json!({
            "Routes": [{
                "ExtraCharge": "None",
                "Price": 2.3,
                "MotChain": [{ "Type": "PlusBus" }],
                "PartialRoutes": [{
                    "RegularStops": [{ "Latitude": 5655904, "DepartureState": "Early" }]
                }]
            }]
        })
    );
    assert!(printed["Routes"][0]["PartialRoutes"][0]["RegularStops"][0]["Latitude"].is_u64());
}

#[tokio::test]
async fn test_cli_route_via() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .and(body_partial_json(json!({
            "origin": "33000742",
            "destination": "33000037",
            "via": "33000028",
            "time": "/Date(1609459200000+0100)/",
            "isarrivaltime": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIPS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from([
        "dvb-route",
        "--base-url",
        uri.as_str(),
        "route",
        "--via",
        "33000028",
        "--arrival",
        "--time",
        "/Date(1609459200000+0100)/",
    ])
    .unwrap();
    let mut out = Vec::new();

    run(&cli, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("SessionId").count(), 1);
}

#[tokio::test]
async fn test_run_route_query_failure_writes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = RouteQuery::default_at(fixed_time());
    let mut out = Vec::new();

    let err = run_route_query(&client, &query, Output::default(), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::Vvo(VvoError::Api { status: 503, .. })));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_route_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (origin, destination) = (stop("33000742"), stop("33000037"));
    let params = route::Params::new(&origin, &destination, fixed_time(), false);

    let err = client.route(&params).await.unwrap_err();
    assert!(matches!(err, VvoError::RateLimited));
}

#[tokio::test]
async fn test_route_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (origin, destination) = (stop("33000742"), stop("33000037"));
    let params = route::Params::new(&origin, &destination, fixed_time(), false);

    match client.route(&params).await.unwrap_err() {
        VvoError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_route_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "ValidationError", "Message": "origin unknown" },
            "ExpirationTime": "/Date(1609459500000+0100)/"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (origin, destination) = (stop("00000000"), stop("33000037"));
    let params = route::Params::new(&origin, &destination, fixed_time(), false);

    match client.route(&params).await.unwrap_err() {
        VvoError::Status { code, message } => {
            assert_eq!(code, StatusCode::ValidationError);
            assert_eq!(message.as_deref(), Some("origin unknown"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_route_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (origin, destination) = (stop("33000742"), stop("33000037"));
    let params = route::Params::new(&origin, &destination, fixed_time(), false);

    match client.route(&params).await.unwrap_err() {
        VvoError::Json { body, .. } => assert_eq!(body.as_deref(), Some("<html>oops</html>")),
        other => panic!("expected JSON error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_find_points() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tr/pointfinder"))
        .and(body_partial_json(json!({
            "query": "Postplatz",
            "stopsOnly": true,
            "dvb": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "PointStatus": "List",
            "Points": [
                "33000037|||Postplatz|5657164|4621159|0||",
                "33000142|||Postplatz (Wilsdruffer Str.)|5657200|4621100|0||"
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client
        .find_points(&point::Params::stops("Postplatz"))
        .await
        .unwrap();

    assert_eq!(found.points.len(), 2);
    assert_eq!(found.points[0].id, "33000037");
    assert_eq!(found.points[0].coords, (5657164, 4621159));
}

#[tokio::test]
async fn test_departure_monitor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dm"))
        .and(body_partial_json(json!({ "stopid": "33000037", "limit": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "Name": "Postplatz",
            "Place": "Dresden",
            "Departures": [{
                "Id": "voe:11002: :H:j25",
                "LineName": "2",
                "Direction": "Kleinzschachwitz",
                "Mot": "Tram",
                "ScheduledTime": "/Date(1609459260000+0100)/"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let postplatz = stop("33000037");
    let monitor = client
        .departure_monitor(&monitor::Params::new(&postplatz).with_limit(2))
        .await
        .unwrap();

    assert_eq!(monitor.place.as_deref(), Some("Dresden"));
    assert_eq!(monitor.next_line("2").unwrap().mot, Mot::Tram);
}

#[tokio::test]
async fn test_lines() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/stt/lines"))
        .and(body_partial_json(json!({ "stopid": "33000037" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "Lines": [{ "Name": "1", "Mot": "Tram", "Directions": [{ "Name": "Prohlis" }] }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let lines = client.lines(&stop("33000037")).await.unwrap();

    assert_eq!(lines.lines.len(), 1);
    assert_eq!(lines.lines[0].directions[0].name, "Prohlis");
}

#[tokio::test]
async fn test_trip_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dm/trip"))
        .and(body_partial_json(json!({
            "tripid": "71313709",
            "stopid": "33000037",
            "time": "/Date(1609459200000+0100)/",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "Stops": [
                { "Name": "Helmholtzstraße", "Position": "Previous" },
                { "Name": "Postplatz", "Position": "Current", "SequenceOnTrip": 7 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let postplatz = stop("33000037");
    let trip = client
        .trip_details(&trip::Params::new("71313709", &postplatz, fixed_time()))
        .await
        .unwrap();

    assert_eq!(trip.stops.len(), 2);
    assert_eq!(trip.current().unwrap().sequence_on_trip, Some(7));
}

#[tokio::test]
async fn test_trip_details_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dm/trip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "ServiceError", "Message": "trip expired" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let postplatz = stop("33000037");
    let err = client
        .trip_details(&trip::Params::new("71313709", &postplatz, fixed_time()))
        .await
        .unwrap_err();

    assert!(matches!(err, VvoError::Status { code: StatusCode::ServiceError, .. }));
}

#[tokio::test]
async fn test_route_changes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rc"))
        .and(body_partial_json(json!({ "shortterm": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "Changes": [{ "Id": "511595", "Title": "Gleisbauarbeiten", "LineIds": ["428296"] }],
            "Banners": [{ "Title": "Streik" }],
            "Lines": [{ "Id": "428296", "Name": "7", "Mot": "Tram" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = changes::Params {
        shortterm: Some(true),
        provider: None,
    };
    let changes = client.route_changes(&params).await.unwrap();

    assert_eq!(changes.for_line("428296").count(), 1);
    assert_eq!(changes.banners[0].title.as_deref(), Some("Streik"));
    assert_eq!(changes.lines[0].mot, Some(Mot::Tram));
}

#[tokio::test]
async fn test_route_changes_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rc"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .route_changes(&changes::Params::default())
        .await
        .unwrap_err();

    assert!(matches!(err, VvoError::RateLimited));
}

#[tokio::test]
async fn test_route_change_lines() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rc/lines"))
        .and(body_partial_json(json!({ "format": "json" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": { "Code": "Ok" },
            "Lines": [
                { "Id": "428296", "Name": "7", "Mot": "Tram" },
                { "Id": "428400", "Name": "62", "Mot": "CityBus" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from(["dvb-route", "--base-url", uri.as_str(), "changes", "--lines"])
        .unwrap();
    let mut out = Vec::new();

    run(&cli, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Name: '7'"));
    assert!(text.contains("Mot: 'CityBus'"));
    assert!(!text.contains("null"));
}
