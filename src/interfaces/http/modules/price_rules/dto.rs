//! Pricing rule DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{PricingRule, RuleDraft, Tariff};
use crate::shared::validations::fare_type_part;

/// Published pricing rule
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriceRuleResponse {
    pub city_code: String,
    pub vehicle_type: String,
    /// `{city_code}${vehicle_type}`
    pub fare_type: String,
    pub fare_version: i32,
    #[schema(value_type = String, example = "10.00")]
    pub start_fare: Decimal,
    /// Kilometres included in the start fare
    pub start_mile: i32,
    /// Price per kilometre beyond `start_mile`
    #[schema(value_type = String, example = "1.80")]
    pub unit_price_per_mile: Decimal,
    #[schema(value_type = String, example = "0.50")]
    pub unit_price_per_minute: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<PricingRule> for PriceRuleResponse {
    fn from(r: PricingRule) -> Self {
        Self {
            start_fare: r.start_fare(),
            start_mile: r.start_mile_km(),
            unit_price_per_mile: r.unit_price_per_km(),
            unit_price_per_minute: r.unit_price_per_minute(),
            fare_type: r.fare_type.to_string(),
            fare_version: r.version,
            city_code: r.city_code,
            vehicle_type: r.vehicle_type,
            created_at: r.created_at,
        }
    }
}

/// Body of `add` and `edit`
///
/// Money fields accept JSON strings (`"1.80"`) or numbers.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PriceRuleRequest {
    #[validate(
        length(min = 1, max = 16, message = "city_code is required"),
        custom(function = "fare_type_part")
    )]
    pub city_code: String,
    #[validate(
        length(min = 1, max = 16, message = "vehicle_type is required"),
        custom(function = "fare_type_part")
    )]
    pub vehicle_type: String,
    #[schema(value_type = String, example = "10.00")]
    pub start_fare: Decimal,
    #[validate(range(min = 0, message = "start_mile must be non-negative"))]
    pub start_mile: i32,
    #[schema(value_type = String, example = "1.80")]
    pub unit_price_per_mile: Decimal,
    #[schema(value_type = String, example = "0.50")]
    pub unit_price_per_minute: Decimal,
}

impl From<PriceRuleRequest> for RuleDraft {
    fn from(req: PriceRuleRequest) -> Self {
        RuleDraft {
            city_code: req.city_code,
            vehicle_type: req.vehicle_type,
            tariff: Tariff {
                start_fare: req.start_fare,
                start_mile_km: req.start_mile,
                unit_price_per_km: req.unit_price_per_mile,
                unit_price_per_minute: req.unit_price_per_minute,
            },
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FareTypeQuery {
    /// Fare type, e.g. `110000$1`
    pub fare_type: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExistsQuery {
    pub city_code: String,
    pub vehicle_type: String,
}

/// Staleness check for a rule version held by a caller
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IsNewRequest {
    #[validate(length(min = 1, message = "fare_type is required"))]
    pub fare_type: String,
    pub fare_version: i32,
}
