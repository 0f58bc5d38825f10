#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use fare_service::application::{FareQuoteService, PricingRuleStore};
use fare_service::domain::TripDistanceDuration;
use fare_service::infrastructure::{InMemoryPricingRuleRepository, StaticRouteProvider};
use fare_service::interfaces::http::modules::health::HealthState;
use fare_service::interfaces::http::{create_api_router, AppState};

/// Router over an empty in-memory store whose mapping service answers every
/// route with 6500 m / 1800 s.
pub fn app() -> Router {
    app_with_trip(TripDistanceDuration::new(6500, 1800).unwrap())
}

pub fn app_with_trip(trip: TripDistanceDuration) -> Router {
    let rules = PricingRuleStore::new(Arc::new(InMemoryPricingRuleRepository::new()));
    let quotes = FareQuoteService::new(Arc::new(StaticRouteProvider::new(trip)), rules.clone());
    create_api_router(AppState { rules, quotes }, HealthState::new(None), None)
}

/// Send a request and decode the JSON body (`Value::Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn beijing_rule() -> Value {
    serde_json::json!({
        "city_code": "110000",
        "vehicle_type": "1",
        "start_fare": "10.00",
        "start_mile": 3,
        "unit_price_per_mile": "1.80",
        "unit_price_per_minute": "0.50"
    })
}

pub fn beijing_route() -> Value {
    serde_json::json!({
        "dep_longitude": "116.397128",
        "dep_latitude": "39.916527",
        "dest_longitude": "116.486409",
        "dest_latitude": "39.921489",
        "city_code": "110000",
        "vehicle_type": "1"
    })
}
