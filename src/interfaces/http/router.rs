//! API Router with Swagger UI

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{FareQuoteService, PricingRuleStore};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{fares, price_rules};

/// State shared by the pricing handlers.
#[derive(Clone)]
pub struct AppState {
    pub rules: PricingRuleStore,
    pub quotes: FareQuoteService,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Fares
        fares::forecast_price,
        fares::calculate_price,
        // Price rules
        price_rules::list_price_rules,
        price_rules::get_newest_version,
        price_rules::get_history,
        price_rules::is_new,
        price_rules::exists,
        price_rules::add_price_rule,
        price_rules::edit_price_rule,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            fares::dto::ForecastPriceRequest,
            fares::dto::CalculatePriceRequest,
            fares::dto::FareQuoteResponse,
            fares::dto::FareBreakdownDto,
            price_rules::dto::PriceRuleRequest,
            price_rules::dto::PriceRuleResponse,
            price_rules::dto::IsNewRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Fares", description = "Fare estimation and calculation"),
        (name = "Price Rules", description = "Versioned pricing rules per city and vehicle type"),
    ),
    info(
        title = "Fare Service API",
        version = "1.0.0",
        description = "Ride-hailing fare estimation against versioned pricing rules",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus recorder handle is given.
pub fn create_api_router(
    state: AppState,
    health: HealthState,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let price_rule_routes = Router::new()
        .route(
            "/",
            get(price_rules::list_price_rules)
                .post(price_rules::add_price_rule)
                .put(price_rules::edit_price_rule),
        )
        .route("/newest", get(price_rules::get_newest_version))
        .route("/history", get(price_rules::get_history))
        .route("/is-new", post(price_rules::is_new))
        .route("/exists", get(price_rules::exists))
        .with_state(state.clone());

    let fare_routes = Router::new()
        .route("/api/v1/forecast-price", post(fares::forecast_price))
        .route("/api/v1/calculate-price", post(fares::calculate_price))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(fare_routes)
        .nest("/api/v1/price-rules", price_rule_routes);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
