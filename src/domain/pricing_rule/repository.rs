//! Pricing rule repository interface

use async_trait::async_trait;

use super::model::{FareType, PricingRule};
use crate::domain::DomainResult;

/// Append-only storage of pricing rules.
///
/// Implementations must reject a second row for the same
/// `(fare_type, version)` atomically with `PricingError::UniquenessViolation`.
#[async_trait]
pub trait PricingRuleRepository: Send + Sync {
    /// Every version of `fare_type`, in no particular order.
    async fn select_by_fare_type(&self, fare_type: &FareType) -> DomainResult<Vec<PricingRule>>;
    async fn select_all(&self) -> DomainResult<Vec<PricingRule>>;
    async fn insert(&self, rule: PricingRule) -> DomainResult<PricingRule>;
}
