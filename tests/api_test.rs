//! End-to-end tests of the REST API over the in-memory store.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, app_with_trip, beijing_route, beijing_rule, send};
use fare_service::domain::TripDistanceDuration;

#[tokio::test]
async fn forecast_prices_route_with_newest_rule() {
    let app = app();
    let (status, _) = send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/forecast-price", Some(beijing_route())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["code"], "SUCCESS");
    assert_eq!(body["data"]["price"], "31.30");
    assert_eq!(body["data"]["fare_type"], "110000$1");
    assert_eq!(body["data"]["fare_version"], 1);
    assert_eq!(body["data"]["distance"], 6500);
    assert_eq!(body["data"]["duration"], 1800);
}

#[tokio::test]
async fn forecast_without_rule_is_price_not_exists() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/v1/forecast-price", Some(beijing_route())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "PRICE_NOT_EXISTS");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn forecast_rejects_bad_coordinates() {
    let app = app();
    let mut route = beijing_route();
    route["dep_latitude"] = json!("95.0");
    let (status, body) = send(&app, "POST", "/api/v1/forecast-price", Some(route)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn zero_trip_costs_the_start_fare() {
    let app = app_with_trip(TripDistanceDuration::new(0, 0).unwrap());
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;

    let (status, body) = send(&app, "POST", "/api/v1/forecast-price", Some(beijing_route())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "10.00");
}

#[tokio::test]
async fn calculate_price_uses_given_distance_and_duration() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/calculate-price",
        Some(json!({"distance": 2000, "duration": 600, "city_code": "110000", "vehicle_type": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 2 km is inside the included 3 km; 10 min at 0.50
    assert_eq!(body["data"]["price"], "15.00");
    assert_eq!(body["data"]["breakdown"]["billable_km"], "0.00");
}

#[tokio::test]
async fn calculate_price_rejects_negative_distance() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/calculate-price",
        Some(json!({"distance": -1, "duration": 600, "city_code": "110000", "vehicle_type": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn edit_publishes_new_version_and_quotes_follow_it() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;

    let mut edited = beijing_rule();
    edited["start_fare"] = json!("12.00");
    let (status, body) = send(&app, "PUT", "/api/v1/price-rules", Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fare_version"], 2);

    let (_, body) = send(&app, "POST", "/api/v1/forecast-price", Some(beijing_route())).await;
    assert_eq!(body["data"]["price"], "33.30");
    assert_eq!(body["data"]["fare_version"], 2);

    let (_, body) = send(&app, "GET", "/api/v1/price-rules/history?fare_type=110000%241", None).await;
    let versions: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["fare_version"].as_i64().unwrap())
        .collect();
    assert_eq!(versions, vec![1, 2]);
}

#[tokio::test]
async fn is_new_tracks_the_current_version() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;

    let check = |version: i32| json!({"fare_type": "110000$1", "fare_version": version});

    let (_, body) = send(&app, "POST", "/api/v1/price-rules/is-new", Some(check(1))).await;
    assert_eq!(body["data"], true);

    let mut edited = beijing_rule();
    edited["unit_price_per_minute"] = json!("0.60");
    send(&app, "PUT", "/api/v1/price-rules", Some(edited)).await;

    let (_, body) = send(&app, "POST", "/api/v1/price-rules/is-new", Some(check(1))).await;
    assert_eq!(body["data"], false);
    let (_, body) = send(&app, "POST", "/api/v1/price-rules/is-new", Some(check(2))).await;
    assert_eq!(body["data"], true);
}

#[tokio::test]
async fn is_new_for_unknown_fare_type_is_false() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/price-rules/is-new",
        Some(json!({"fare_type": "999999$9", "fare_version": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], false);
}

#[tokio::test]
async fn add_twice_conflicts() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;
    let (status, body) = send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PRICE_RULE_EXISTS");
}

#[tokio::test]
async fn edit_without_changes_is_rejected() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;
    let (status, body) = send(&app, "PUT", "/api/v1/price-rules", Some(beijing_rule())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PRICE_RULE_NOT_EDIT");
}

#[tokio::test]
async fn negative_tariff_is_rejected() {
    let app = app();
    let mut rule = beijing_rule();
    rule["unit_price_per_mile"] = json!("-1.80");
    let (status, body) = send(&app, "POST", "/api/v1/price-rules", Some(rule)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "PRICE_RULE_INVALID");
}

#[tokio::test]
async fn separator_in_city_or_vehicle_is_rejected() {
    let app = app();
    let mut rule = beijing_rule();
    rule["city_code"] = json!("11$0");
    rule["vehicle_type"] = json!("1");
    let (status, body) = send(&app, "POST", "/api/v1/price-rules", Some(rule)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let mut rule = beijing_rule();
    rule["city_code"] = json!("11");
    rule["vehicle_type"] = json!("0$1");
    let (status, _) = send(&app, "PUT", "/api/v1/price-rules", Some(rule)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut route = beijing_route();
    route["vehicle_type"] = json!("0$1");
    let (status, _) = send(&app, "POST", "/api/v1/forecast-price", Some(route)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, "GET", "/api/v1/price-rules/exists?city_code=11%240&vehicle_type=1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "PRICE_RULE_INVALID");
}

#[tokio::test]
async fn exists_and_newest_lookups() {
    let app = app();
    let (_, body) = send(&app, "GET", "/api/v1/price-rules/exists?city_code=110000&vehicle_type=1", None).await;
    assert_eq!(body["data"], false);

    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;

    let (_, body) = send(&app, "GET", "/api/v1/price-rules/exists?city_code=110000&vehicle_type=1", None).await;
    assert_eq!(body["data"], true);

    let (status, body) = send(&app, "GET", "/api/v1/price-rules/newest?fare_type=110000%241", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["start_fare"], "10.00");
    assert_eq!(body["data"]["unit_price_per_mile"], "1.80");

    let (status, body) = send(&app, "GET", "/api/v1/price-rules/newest?fare_type=110000%242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PRICE_NOT_EXISTS");
}

#[tokio::test]
async fn list_returns_newest_rule_per_fare_type() {
    let app = app();
    send(&app, "POST", "/api/v1/price-rules", Some(beijing_rule())).await;
    let mut shanghai = beijing_rule();
    shanghai["city_code"] = json!("310000");
    send(&app, "POST", "/api/v1/price-rules", Some(shanghai)).await;
    let mut edited = beijing_rule();
    edited["start_mile"] = json!(2);
    send(&app, "PUT", "/api/v1/price-rules", Some(edited)).await;

    let (status, body) = send(&app, "GET", "/api/v1/price-rules", None).await;
    assert_eq!(status, StatusCode::OK);
    let rules = body["data"].as_array().unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0]["fare_type"], "110000$1");
    assert_eq!(rules[0]["fare_version"], 2);
    assert_eq!(rules[1]["fare_type"], "310000$1");
    assert_eq!(rules[1]["fare_version"], 1);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/v1/price-rules", Some(json!({"city_code": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn health_reports_memory_storage() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn openapi_document_lists_pricing_paths() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api-doc/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/forecast-price"));
    assert!(paths.contains_key("/api/v1/price-rules/is-new"));
}
