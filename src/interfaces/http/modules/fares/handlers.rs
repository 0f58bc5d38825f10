//! Fare estimation REST API handlers

use axum::{extract::State, Json};

use super::dto::{CalculatePriceRequest, FareQuoteResponse, ForecastPriceRequest};
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/forecast-price",
    tag = "Fares",
    request_body = ForecastPriceRequest,
    responses(
        (status = 200, description = "Estimated fare", body = ApiResponse<FareQuoteResponse>),
        (status = 404, description = "No pricing rule for the city and vehicle type"),
        (status = 422, description = "Invalid coordinates"),
        (status = 502, description = "Mapping service unavailable")
    )
)]
pub async fn forecast_price(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ForecastPriceRequest>,
) -> Result<Json<ApiResponse<FareQuoteResponse>>, ApiError> {
    let quote = state
        .quotes
        .forecast(&req.route(), &req.fare_type())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(quote.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/calculate-price",
    tag = "Fares",
    request_body = CalculatePriceRequest,
    responses(
        (status = 200, description = "Fare of the finished trip", body = ApiResponse<FareQuoteResponse>),
        (status = 404, description = "No pricing rule for the city and vehicle type"),
        (status = 422, description = "Negative distance or duration")
    )
)]
pub async fn calculate_price(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CalculatePriceRequest>,
) -> Result<Json<ApiResponse<FareQuoteResponse>>, ApiError> {
    let quote = state
        .quotes
        .calculate(req.distance, req.duration, &req.fare_type())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(quote.into())))
}
