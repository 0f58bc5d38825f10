//! Domain errors

use thiserror::Error;

use super::pricing_rule::FareType;

/// Errors surfaced by the pricing core and its collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// No pricing rule has been published for the fare type.
    #[error("No pricing rule for fare type {0}")]
    RuleNotFound(FareType),

    /// A tariff field violates non-negativity.
    #[error("Invalid pricing rule: {0}")]
    InvalidRule(String),

    /// Distance or duration is out of range.
    #[error("Invalid trip: {0}")]
    InvalidTrip(String),

    /// A publish collided with an existing `(fare_type, version)` row.
    #[error("Pricing rule {fare_type} version {version} already exists")]
    UniquenessViolation { fare_type: FareType, version: i32 },

    /// `add` was called for a fare type that already has rules.
    #[error("Pricing rule for fare type {0} already exists")]
    RuleAlreadyExists(FareType),

    /// `edit` was called without changing any tariff field.
    #[error("Pricing rule for fare type {0} is unchanged")]
    RuleUnchanged(FareType),

    /// The mapping service failed to resolve a route.
    #[error("Mapping service error: {message}")]
    Mapping { message: String, transient: bool },

    /// The rule storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PricingError {
    /// Whether this error is likely transient (e.g. mapping service hiccup)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, PricingError::Mapping { transient: true, .. })
    }

    /// Stable machine-readable code reported to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::RuleNotFound(_) => "PRICE_NOT_EXISTS",
            PricingError::InvalidRule(_) => "PRICE_RULE_INVALID",
            PricingError::InvalidTrip(_) => "TRIP_INVALID",
            PricingError::UniquenessViolation { .. } => "PRICE_RULE_VERSION_CONFLICT",
            PricingError::RuleAlreadyExists(_) => "PRICE_RULE_EXISTS",
            PricingError::RuleUnchanged(_) => "PRICE_RULE_NOT_EDIT",
            PricingError::Mapping { .. } => "MAP_UNAVAILABLE",
            PricingError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_mapping_errors_are_retryable() {
        let transient = PricingError::Mapping {
            message: "timeout".into(),
            transient: true,
        };
        let permanent = PricingError::Mapping {
            message: "bad coordinates".into(),
            transient: false,
        };
        assert!(transient.is_transient());
        assert!(!permanent.is_transient());
        assert!(!PricingError::Storage("disk full".into()).is_transient());
    }

    #[test]
    fn missing_rule_has_distinct_code() {
        let err = PricingError::RuleNotFound(FareType::from("110000$1"));
        assert_eq!(err.code(), "PRICE_NOT_EXISTS");
        assert_eq!(err.to_string(), "No pricing rule for fare type 110000$1");
    }
}
