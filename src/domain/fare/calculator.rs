//! Fare calculation
//!
//! Converts a trip's distance/duration and a pricing rule into a monetary
//! amount using fixed-point decimal arithmetic.
//!
//! Rounding is two-tier: the distance fare is rounded to cents before it is
//! summed, the time fare is not and only takes part in the final rounding of
//! the total. Both conversions (m → km, s → min) are rounded to two decimals
//! first. All rounding is half-up.

use rust_decimal::{Decimal, RoundingStrategy};

use super::model::{FareBreakdown, FareQuote, TripDistanceDuration};
use crate::domain::{DomainResult, PricingError, PricingRule, Tariff};

const METERS_PER_KM: i64 = 1000;
const SECONDS_PER_MINUTE: i64 = 60;
const MONEY_SCALE: u32 = 2;

/// Stateless fare calculator. Safe to call from any number of tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FareCalculator;

impl FareCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Price `trip` with `rule`.
    pub fn calculate(&self, trip: &TripDistanceDuration, rule: &PricingRule) -> DomainResult<FareQuote> {
        let breakdown = self.breakdown(trip, &rule.tariff)?;
        Ok(FareQuote {
            amount: breakdown.total,
            fare_type: rule.fare_type.clone(),
            fare_version: rule.version,
            breakdown,
        })
    }

    /// Compute every intermediate value of the fare.
    pub fn breakdown(&self, trip: &TripDistanceDuration, tariff: &Tariff) -> DomainResult<FareBreakdown> {
        tariff.validate()?;
        trip.validate()?;

        // Distance fare: km beyond the included distance, rounded before summing
        let distance_km = round_half_up(Decimal::from(trip.distance_meters) / Decimal::from(METERS_PER_KM));
        let included_km = Decimal::from(tariff.start_mile_km);
        let billable_km = round_half_up(if distance_km > included_km {
            distance_km - included_km
        } else {
            Decimal::ZERO
        });
        let distance_fare = round_half_up(
            billable_km
                .checked_mul(tariff.unit_price_per_km)
                .ok_or_else(|| overflow("distance fare"))?,
        );

        // Time fare: left unrounded
        let duration_min =
            round_half_up(Decimal::from(trip.duration_seconds) / Decimal::from(SECONDS_PER_MINUTE));
        let time_fare = duration_min
            .checked_mul(tariff.unit_price_per_minute)
            .ok_or_else(|| overflow("time fare"))?;

        let total = tariff
            .start_fare
            .checked_add(distance_fare)
            .and_then(|sum| sum.checked_add(time_fare))
            .ok_or_else(|| overflow("total"))?;

        Ok(FareBreakdown {
            start_fare: tariff.start_fare,
            distance_km,
            billable_km,
            distance_fare,
            duration_min,
            time_fare,
            total: round_half_up(total),
        })
    }
}

/// Round to cents, ties away from zero, and pin the scale to two decimals.
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

fn overflow(what: &str) -> PricingError {
    PricingError::InvalidTrip(format!("{} exceeds the representable range", what))
}

// ── Tests ──────────────────────────────────────────────────────
