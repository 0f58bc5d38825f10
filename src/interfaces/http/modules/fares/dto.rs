//! Fare quote DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::{RouteRequest, TripQuote};
use crate::domain::{FareBreakdown, FareType};
use crate::shared::validations::fare_type_part;

fn coordinate(value: &str, limit: f64) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(()),
        _ => {
            let mut err = ValidationError::new("coordinate");
            err.message = Some(format!("{:?} is not a coordinate within [-{limit}, {limit}]", value).into());
            Err(err)
        }
    }
}

fn longitude(value: &str) -> Result<(), ValidationError> {
    coordinate(value, 180.0)
}

fn latitude(value: &str) -> Result<(), ValidationError> {
    coordinate(value, 90.0)
}

/// Estimate the fare between two points
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForecastPriceRequest {
    #[validate(custom(function = "longitude"))]
    #[schema(example = "116.397128")]
    pub dep_longitude: String,
    #[validate(custom(function = "latitude"))]
    #[schema(example = "39.916527")]
    pub dep_latitude: String,
    #[validate(custom(function = "longitude"))]
    #[schema(example = "116.486409")]
    pub dest_longitude: String,
    #[validate(custom(function = "latitude"))]
    #[schema(example = "39.921489")]
    pub dest_latitude: String,
    #[validate(
        length(min = 1, message = "city_code is required"),
        custom(function = "fare_type_part")
    )]
    #[schema(example = "110000")]
    pub city_code: String,
    #[validate(
        length(min = 1, message = "vehicle_type is required"),
        custom(function = "fare_type_part")
    )]
    #[schema(example = "1")]
    pub vehicle_type: String,
}

impl ForecastPriceRequest {
    pub fn route(&self) -> RouteRequest {
        RouteRequest {
            dep_longitude: self.dep_longitude.trim().to_string(),
            dep_latitude: self.dep_latitude.trim().to_string(),
            dest_longitude: self.dest_longitude.trim().to_string(),
            dest_latitude: self.dest_latitude.trim().to_string(),
        }
    }

    pub fn fare_type(&self) -> FareType {
        FareType::new(&self.city_code, &self.vehicle_type)
    }
}

/// Price a finished trip
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CalculatePriceRequest {
    /// Metres
    #[validate(range(min = 0, message = "distance must be non-negative"))]
    pub distance: i64,
    /// Seconds
    #[validate(range(min = 0, message = "duration must be non-negative"))]
    pub duration: i64,
    #[validate(
        length(min = 1, message = "city_code is required"),
        custom(function = "fare_type_part")
    )]
    pub city_code: String,
    #[validate(
        length(min = 1, message = "vehicle_type is required"),
        custom(function = "fare_type_part")
    )]
    pub vehicle_type: String,
}

impl CalculatePriceRequest {
    pub fn fare_type(&self) -> FareType {
        FareType::new(&self.city_code, &self.vehicle_type)
    }
}

/// Intermediate values of the fare
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FareBreakdownDto {
    #[schema(value_type = String)]
    pub start_fare: Decimal,
    #[schema(value_type = String)]
    pub distance_km: Decimal,
    #[schema(value_type = String)]
    pub billable_km: Decimal,
    #[schema(value_type = String)]
    pub distance_fare: Decimal,
    #[schema(value_type = String)]
    pub duration_min: Decimal,
    #[schema(value_type = String)]
    pub time_fare: Decimal,
}

impl From<FareBreakdown> for FareBreakdownDto {
    fn from(b: FareBreakdown) -> Self {
        Self {
            start_fare: b.start_fare,
            distance_km: b.distance_km,
            billable_km: b.billable_km,
            distance_fare: b.distance_fare,
            duration_min: b.duration_min,
            time_fare: b.time_fare,
        }
    }
}

/// Priced trip
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FareQuoteResponse {
    /// Two-decimal amount, e.g. `"31.30"`
    #[schema(value_type = String, example = "31.30")]
    pub price: Decimal,
    pub fare_type: String,
    pub fare_version: i32,
    /// Metres
    pub distance: i64,
    /// Seconds
    pub duration: i64,
    pub breakdown: FareBreakdownDto,
}

impl From<TripQuote> for FareQuoteResponse {
    fn from(t: TripQuote) -> Self {
        Self {
            price: t.quote.amount,
            fare_type: t.quote.fare_type.to_string(),
            fare_version: t.quote.fare_version,
            distance: t.trip.distance_meters,
            duration: t.trip.duration_seconds,
            breakdown: t.quote.breakdown.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(dep_longitude: &str, dest_latitude: &str) -> ForecastPriceRequest {
        ForecastPriceRequest {
            dep_longitude: dep_longitude.into(),
            dep_latitude: "39.916527".into(),
            dest_longitude: "116.486409".into(),
            dest_latitude: dest_latitude.into(),
            city_code: "110000".into(),
            vehicle_type: "1".into(),
        }
    }

    #[test]
    fn accepts_valid_coordinates() {
        assert!(forecast("116.397128", "39.921489").validate().is_ok());
        assert!(forecast("-180", "90").validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_or_garbage_coordinates() {
        assert!(forecast("181", "39.9").validate().is_err());
        assert!(forecast("116.3", "-90.5").validate().is_err());
        assert!(forecast("east", "39.9").validate().is_err());
        assert!(forecast("NaN", "39.9").validate().is_err());
    }

    #[test]
    fn rejects_separator_in_city_or_vehicle() {
        let mut req = forecast("116.3", "39.9");
        req.city_code = "11$0".into();
        assert!(req.validate().is_err());

        let req = CalculatePriceRequest {
            distance: 1000,
            duration: 60,
            city_code: "11".into(),
            vehicle_type: "0$1".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn fare_type_joins_city_and_vehicle() {
        assert_eq!(forecast("116.3", "39.9").fare_type().as_str(), "110000$1");
    }
}
