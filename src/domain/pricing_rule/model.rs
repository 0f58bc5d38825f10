//! Pricing rule domain entity

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainResult, PricingError};

/// Key of a tariff family, conventionally `"{city_code}${vehicle_type}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FareType(String);

impl FareType {
    pub const SEPARATOR: char = '$';

    pub fn new(city_code: &str, vehicle_type: &str) -> Self {
        Self(format!("{}{}{}", city_code, Self::SEPARATOR, vehicle_type))
    }

    /// Like [`FareType::new`], but rejects parts that would make the key
    /// ambiguous (`"11$0" + "1"` and `"11" + "0$1"` both join to `11$0$1`).
    pub fn try_new(city_code: &str, vehicle_type: &str) -> DomainResult<Self> {
        Self::check_part("city_code", city_code)?;
        Self::check_part("vehicle_type", vehicle_type)?;
        Ok(Self::new(city_code, vehicle_type))
    }

    /// A key part must be non-empty and free of [`FareType::SEPARATOR`].
    pub fn check_part(field: &str, value: &str) -> DomainResult<()> {
        if value.is_empty() {
            return Err(PricingError::InvalidRule(format!("{} must not be empty", field)));
        }
        if value.contains(Self::SEPARATOR) {
            return Err(PricingError::InvalidRule(format!(
                "{} must not contain '{}'",
                field,
                Self::SEPARATOR
            )));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FareType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FareType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for FareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tariff terms shared by a published rule and a draft awaiting publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tariff {
    /// Flat charge included in every trip
    pub start_fare: Decimal,
    /// Distance (km) covered by `start_fare`
    pub start_mile_km: i32,
    /// Rate per km beyond `start_mile_km`
    pub unit_price_per_km: Decimal,
    /// Rate per minute of trip duration
    pub unit_price_per_minute: Decimal,
}

impl Tariff {
    /// Rejects any negative tariff field.
    pub fn validate(&self) -> DomainResult<()> {
        let negative = |name: &str| PricingError::InvalidRule(format!("{} must be non-negative", name));

        if self.start_fare < Decimal::ZERO {
            return Err(negative("start_fare"));
        }
        if self.start_mile_km < 0 {
            return Err(negative("start_mile_km"));
        }
        if self.unit_price_per_km < Decimal::ZERO {
            return Err(negative("unit_price_per_km"));
        }
        if self.unit_price_per_minute < Decimal::ZERO {
            return Err(negative("unit_price_per_minute"));
        }
        Ok(())
    }
}

/// An immutable, versioned tariff record.
///
/// Rules are write-once: a tariff change is published as a new row with a
/// higher `version`, and the current rule of a fare type is the one with the
/// maximum version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRule {
    pub city_code: String,
    pub vehicle_type: String,
    pub fare_type: FareType,
    pub version: i32,
    pub tariff: Tariff,
    pub created_at: DateTime<Utc>,
}

impl PricingRule {
    pub fn start_fare(&self) -> Decimal {
        self.tariff.start_fare
    }

    pub fn start_mile_km(&self) -> i32 {
        self.tariff.start_mile_km
    }

    pub fn unit_price_per_km(&self) -> Decimal {
        self.tariff.unit_price_per_km
    }

    pub fn unit_price_per_minute(&self) -> Decimal {
        self.tariff.unit_price_per_minute
    }
}

/// Input of the administrative `add` / `edit` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub city_code: String,
    pub vehicle_type: String,
    pub tariff: Tariff,
}

impl RuleDraft {
    pub fn fare_type(&self) -> FareType {
        FareType::new(&self.city_code, &self.vehicle_type)
    }

    /// Checks the key parts and the tariff.
    pub fn validate(&self) -> DomainResult<()> {
        FareType::check_part("city_code", &self.city_code)?;
        FareType::check_part("vehicle_type", &self.vehicle_type)?;
        self.tariff.validate()
    }

    /// Stamp the draft as `version` of its fare type.
    pub fn publish(self, version: i32, now: DateTime<Utc>) -> PricingRule {
        let fare_type = self.fare_type();
        PricingRule {
            city_code: self.city_code,
            vehicle_type: self.vehicle_type,
            fare_type,
            version,
            tariff: self.tariff,
            created_at: now,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
