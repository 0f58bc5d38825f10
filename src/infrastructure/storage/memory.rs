//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DomainResult, FareType, PricingError, PricingRule, PricingRuleRepository};

/// In-memory rule log for development and testing
///
/// Rows are grouped by fare type. An insert holds the fare type's entry lock
/// while it checks for an existing version, so `(fare_type, version)` stays
/// unique under concurrent publishers.
#[derive(Default)]
pub struct InMemoryPricingRuleRepository {
    rules: DashMap<FareType, Vec<PricingRule>>,
}

impl InMemoryPricingRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_row(&self, rule: PricingRule) -> DomainResult<PricingRule> {
        let mut rows = self.rules.entry(rule.fare_type.clone()).or_default();
        if rows.iter().any(|r| r.version == rule.version) {
            return Err(PricingError::UniquenessViolation {
                fare_type: rule.fare_type,
                version: rule.version,
            });
        }
        rows.push(rule.clone());
        Ok(rule)
    }
}

#[async_trait]
impl PricingRuleRepository for InMemoryPricingRuleRepository {
    async fn select_by_fare_type(&self, fare_type: &FareType) -> DomainResult<Vec<PricingRule>> {
        Ok(self
            .rules
            .get(fare_type)
            .map(|rows| rows.value().clone())
            .unwrap_or_default())
    }

    async fn select_all(&self) -> DomainResult<Vec<PricingRule>> {
        let mut all: Vec<PricingRule> = self
            .rules
            .iter()
            .flat_map(|rows| rows.value().clone())
            .collect();
        all.sort_by(|a, b| a.fare_type.cmp(&b.fare_type).then(a.version.cmp(&b.version)));
        Ok(all)
    }

    async fn insert(&self, rule: PricingRule) -> DomainResult<PricingRule> {
        self.insert_row(rule)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{RuleDraft, Tariff};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn rule(version: i32) -> PricingRule {
        RuleDraft {
            city_code: "110000".into(),
            vehicle_type: "1".into(),
            tariff: Tariff {
                start_fare: dec!(10),
                start_mile_km: 3,
                unit_price_per_km: dec!(1.80),
                unit_price_per_minute: dec!(0.50),
            },
        }
        .publish(version, Utc::now())
    }

    #[tokio::test]
    async fn duplicate_version_is_rejected() {
        let repo = InMemoryPricingRuleRepository::new();
        repo.insert(rule(1)).await.unwrap();
        let err = repo.insert(rule(1)).await.unwrap_err();
        assert!(matches!(err, PricingError::UniquenessViolation { version: 1, .. }));
        assert_eq!(repo.select_all().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_one_version_admit_exactly_one() {
        let repo = Arc::new(InMemoryPricingRuleRepository::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(rule(2)).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(
            repo.select_by_fare_type(&FareType::from("110000$1"))
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
