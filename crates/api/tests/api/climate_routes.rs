use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::{
    Error, PrecipitationObservation, StationActivity, TemperatureObservation, TemperatureSummary,
};
use serde_json::{from_slice, json, Value};
use std::sync::Arc;
use time::macros::date;

fn precipitation(date: &str, station: &str, prcp: Option<f64>) -> PrecipitationObservation {
    PrecipitationObservation {
        date: date.to_string(),
        station: station.to_string(),
        prcp,
    }
}

#[tokio::test]
async fn index_lists_available_routes() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = test_app.get("/").await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("Available Routes:"));
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/YYYY-MM-DD",
        "/api/v1.0/YYYY-MM-DD/YYYY-MM-DD",
    ] {
        assert!(text.contains(route), "missing {route}");
    }
}

#[tokio::test]
async fn precipitation_keeps_every_reading_for_a_date() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_precipitation_last_year()
        .times(1)
        .returning(|| {
            Ok(vec![
                precipitation("2017-08-23", "USC00519281", Some(0.4)),
                precipitation("2017-08-23", "USC00519397", None),
            ])
        });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = test_app.get("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!([
            {"date": "2017-08-23", "station": "USC00519281", "prcp": 0.4},
            {"date": "2017-08-23", "station": "USC00519397", "prcp": null},
        ])
    );
}

#[tokio::test]
async fn stations_keep_query_order() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_station_activity().times(1).returning(|| {
        Ok(vec![
            StationActivity {
                station: String::from("USC00519281"),
                count: 2772,
            },
            StationActivity {
                station: String::from("USC00519397"),
                count: 2724,
            },
            StationActivity {
                station: String::from("USC00518838"),
                count: 511,
            },
        ])
    });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let stations: Vec<StationActivity> = test_app.get_json("/api/v1.0/stations").await;
    let ids: Vec<&str> = stations.iter().map(|s| s.station.as_str()).collect();
    assert_eq!(ids, vec!["USC00519281", "USC00519397", "USC00518838"]);
    assert_eq!(stations[0].count, 2772);
}

#[tokio::test]
async fn tobs_returns_observation_list() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_most_active_station_temperatures()
        .times(1)
        .returning(|| {
            Ok(vec![
                TemperatureObservation {
                    date: String::from("2016-08-22"),
                    station: String::from("USC00519281"),
                    tobs: 78.0,
                },
                TemperatureObservation {
                    date: String::from("2016-08-23"),
                    station: String::from("USC00519281"),
                    tobs: 77.0,
                },
            ])
        });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let observations: Vec<TemperatureObservation> = test_app.get_json("/api/v1.0/tobs").await;
    assert_eq!(observations.len(), 2);
    assert!(observations.iter().all(|o| o.station == "USC00519281"));
}

#[tokio::test]
async fn start_date_summary_uses_open_ended_range() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_summary()
        .withf(|query| query.start == date!(2016 - 08 - 23) && query.end.is_none())
        .times(1)
        .returning(|_| {
            Ok(TemperatureSummary {
                min: Some(58.0),
                avg: Some(74.59),
                max: Some(87.0),
            })
        });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = test_app.get("/api/v1.0/2016-08-23").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = from_slice(&body).unwrap();
    assert_eq!(body, json!({"TMIN": 58.0, "TAVG": 74.59, "TMAX": 87.0}));
}

#[tokio::test]
async fn range_summary_passes_both_dates_unordered() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_summary()
        .withf(|query| {
            query.start == date!(2017 - 08 - 01) && query.end == Some(date!(2017 - 01 - 01))
        })
        .times(1)
        .returning(|_| Ok(TemperatureSummary::default()));
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = test_app.get("/api/v1.0/2017-08-01/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = from_slice(&body).unwrap();
    assert_eq!(body, json!({"TMIN": null, "TAVG": null, "TMAX": null}));
}

#[tokio::test]
async fn malformed_dates_are_client_errors() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_temperature_summary().never();
    let test_app = spawn_app(Arc::new(climate_db)).await;

    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2020%2F01%2F01",
        "/api/v1.0/2017-02-30",
        "/api/v1.0/not-a-date/2017-01-01",
        "/api/v1.0/2017-01-01/2017-13-01",
        "/api/v1.0/+2017-01-01",
        "/api/v1.0/-0001-01-01",
        "/api/v1.0/-0001-01-01/2017-01-01",
    ] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = from_slice(&body).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("expected YYYY-MM-DD"), "{message}");
    }
}

#[tokio::test]
async fn undecodable_path_segments_are_json_client_errors() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_temperature_summary().never();
    let test_app = spawn_app(Arc::new(climate_db)).await;

    for uri in ["/api/v1.0/%FF", "/api/v1.0/%FF/2017-01-01", "/api/v1.0/2017-01-01/%FF"] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = from_slice(&body).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("expected YYYY-MM-DD"), "{message}");
    }
}

#[tokio::test]
async fn dataset_failures_are_server_errors() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_station_activity()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::RowNotFound)));
    climate_db
        .expect_temperature_summary()
        .times(1)
        .returning(|_| Err(Error::Query(sqlx::Error::RowNotFound)));
    let test_app = spawn_app(Arc::new(climate_db)).await;

    for uri in ["/api/v1.0/stations", "/api/v1.0/2017-01-01"] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");

        let body: Value = from_slice(&body).unwrap();
        assert_eq!(body, json!({"error": "climate dataset unavailable"}));
    }
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, _) = test_app.get("/docs").await;
    assert_eq!(status, StatusCode::OK);
}
