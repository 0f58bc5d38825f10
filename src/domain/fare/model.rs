//! Fare value types

use rust_decimal::Decimal;

use crate::domain::{DomainResult, FareType, PricingError};

/// Distance and duration of a trip as reported by the mapping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDistanceDuration {
    pub distance_meters: i64,
    pub duration_seconds: i64,
}

impl TripDistanceDuration {
    pub fn new(distance_meters: i64, duration_seconds: i64) -> DomainResult<Self> {
        let trip = Self {
            distance_meters,
            duration_seconds,
        };
        trip.validate()?;
        Ok(trip)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.distance_meters < 0 {
            return Err(PricingError::InvalidTrip(format!(
                "distance_meters must be non-negative, got {}",
                self.distance_meters
            )));
        }
        if self.duration_seconds < 0 {
            return Err(PricingError::InvalidTrip(format!(
                "duration_seconds must be non-negative, got {}",
                self.duration_seconds
            )));
        }
        Ok(())
    }
}

/// Intermediate values of a fare computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareBreakdown {
    pub start_fare: Decimal,
    pub distance_km: Decimal,
    pub billable_km: Decimal,
    pub distance_fare: Decimal,
    pub duration_min: Decimal,
    /// Not rounded; only the total is.
    pub time_fare: Decimal,
    pub total: Decimal,
}

/// Priced trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuote {
    /// Two-decimal, non-negative amount.
    pub amount: Decimal,
    pub fare_type: FareType,
    pub fare_version: i32,
    pub breakdown: FareBreakdown,
}

impl FareQuote {
    /// Format the amount with exactly two decimals, e.g. `31.30`.
    pub fn format_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_rejects_negative_distance() {
        assert!(matches!(
            TripDistanceDuration::new(-1, 0),
            Err(PricingError::InvalidTrip(_))
        ));
    }

    #[test]
    fn trip_rejects_negative_duration() {
        assert!(matches!(
            TripDistanceDuration::new(0, -60),
            Err(PricingError::InvalidTrip(_))
        ));
    }

    #[test]
    fn trip_accepts_zero() {
        let trip = TripDistanceDuration::new(0, 0).unwrap();
        assert_eq!(trip.distance_meters, 0);
        assert_eq!(trip.duration_seconds, 0);
    }
}
