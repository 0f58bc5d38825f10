//! Pricing rule REST API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{ExistsQuery, FareTypeQuery, IsNewRequest, PriceRuleRequest, PriceRuleResponse};
use crate::domain::FareType;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/price-rules",
    tag = "Price Rules",
    responses(
        (status = 200, description = "Newest rule of every fare type", body = ApiResponse<Vec<PriceRuleResponse>>)
    )
)]
pub async fn list_price_rules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PriceRuleResponse>>>, ApiError> {
    let rules = state.rules.list_newest().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        rules.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/price-rules/newest",
    tag = "Price Rules",
    params(FareTypeQuery),
    responses(
        (status = 200, description = "Newest version", body = ApiResponse<PriceRuleResponse>),
        (status = 404, description = "No rule for the fare type")
    )
)]
pub async fn get_newest_version(
    State(state): State<AppState>,
    Query(q): Query<FareTypeQuery>,
) -> Result<Json<ApiResponse<PriceRuleResponse>>, ApiError> {
    let rule = state
        .rules
        .get_newest_version(&FareType::from(q.fare_type))
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(rule.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/price-rules/history",
    tag = "Price Rules",
    params(FareTypeQuery),
    responses(
        (status = 200, description = "All versions, oldest first", body = ApiResponse<Vec<PriceRuleResponse>>)
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Query(q): Query<FareTypeQuery>,
) -> Result<Json<ApiResponse<Vec<PriceRuleResponse>>>, ApiError> {
    let rules = state
        .rules
        .history(&FareType::from(q.fare_type))
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        rules.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/price-rules/is-new",
    tag = "Price Rules",
    request_body = IsNewRequest,
    responses(
        (status = 200, description = "`true` if the version is still current", body = ApiResponse<bool>)
    )
)]
pub async fn is_new(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<IsNewRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let fresh = state
        .rules
        .is_new(&FareType::from(req.fare_type), req.fare_version)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(fresh)))
}

#[utoipa::path(
    get,
    path = "/api/v1/price-rules/exists",
    tag = "Price Rules",
    params(ExistsQuery),
    responses(
        (status = 200, description = "`true` if any rule exists for the city and vehicle type", body = ApiResponse<bool>),
        (status = 422, description = "Empty key part or one containing `$`")
    )
)]
pub async fn exists(
    State(state): State<AppState>,
    Query(q): Query<ExistsQuery>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let fare_type = FareType::try_new(&q.city_code, &q.vehicle_type).map_err(api_error)?;
    let found = state.rules.exists(&fare_type).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(found)))
}

#[utoipa::path(
    post,
    path = "/api/v1/price-rules",
    tag = "Price Rules",
    request_body = PriceRuleRequest,
    responses(
        (status = 201, description = "Version 1 published", body = ApiResponse<PriceRuleResponse>),
        (status = 409, description = "Fare type already has rules"),
        (status = 422, description = "Invalid tariff")
    )
)]
pub async fn add_price_rule(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PriceRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PriceRuleResponse>>), ApiError> {
    let rule = state.rules.add(req.into()).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(rule.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/price-rules",
    tag = "Price Rules",
    request_body = PriceRuleRequest,
    responses(
        (status = 200, description = "New version published", body = ApiResponse<PriceRuleResponse>),
        (status = 400, description = "Tariff unchanged"),
        (status = 404, description = "No rule for the fare type"),
        (status = 409, description = "Version taken by a concurrent publisher")
    )
)]
pub async fn edit_price_rule(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PriceRuleRequest>,
) -> Result<Json<ApiResponse<PriceRuleResponse>>, ApiError> {
    let rule = state.rules.edit(req.into()).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(rule.into())))
}
