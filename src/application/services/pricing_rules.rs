//! Pricing rule store: current-rule lookup, staleness checks and publishing

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{
    DomainResult, FareType, PricingError, PricingRule, PricingRuleRepository, RuleDraft,
};

/// Service over the versioned rule log.
///
/// The current rule of a fare type is always the row with the highest
/// `version`, selected here rather than by the storage layer.
#[derive(Clone)]
pub struct PricingRuleStore {
    repo: Arc<dyn PricingRuleRepository>,
}

impl PricingRuleStore {
    pub fn new(repo: Arc<dyn PricingRuleRepository>) -> Self {
        Self { repo }
    }

    /// The rule with the maximum version for `fare_type`.
    pub async fn get_newest_version(&self, fare_type: &FareType) -> DomainResult<PricingRule> {
        let rules = self.repo.select_by_fare_type(fare_type).await?;
        newest(rules).ok_or_else(|| PricingError::RuleNotFound(fare_type.clone()))
    }

    /// Whether `version` is still the current version of `fare_type`.
    ///
    /// A fare type without rules has no current version, so nothing matches.
    pub async fn is_new(&self, fare_type: &FareType, version: i32) -> DomainResult<bool> {
        match self.get_newest_version(fare_type).await {
            Ok(current) => {
                debug!(%fare_type, version, current = current.version, "Rule version check");
                Ok(current.version == version)
            }
            Err(PricingError::RuleNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, fare_type: &FareType) -> DomainResult<bool> {
        Ok(!self.repo.select_by_fare_type(fare_type).await?.is_empty())
    }

    /// Every published version of `fare_type`, oldest first.
    pub async fn history(&self, fare_type: &FareType) -> DomainResult<Vec<PricingRule>> {
        let mut rules = self.repo.select_by_fare_type(fare_type).await?;
        rules.sort_by_key(|r| r.version);
        Ok(rules)
    }

    /// The current rule of every fare type, ordered by fare type.
    pub async fn list_newest(&self) -> DomainResult<Vec<PricingRule>> {
        let mut current: BTreeMap<FareType, PricingRule> = BTreeMap::new();
        for rule in self.repo.select_all().await? {
            match current.get(&rule.fare_type) {
                Some(existing) if existing.version >= rule.version => {}
                _ => {
                    current.insert(rule.fare_type.clone(), rule);
                }
            }
        }
        Ok(current.into_values().collect())
    }

    /// Publish version 1 of a new fare type.
    pub async fn add(&self, draft: RuleDraft) -> DomainResult<PricingRule> {
        draft.validate()?;

        let fare_type = draft.fare_type();
        if self.exists(&fare_type).await? {
            return Err(PricingError::RuleAlreadyExists(fare_type));
        }

        let saved = self.repo.insert(draft.publish(1, Utc::now())).await?;
        metrics::counter!("price_rules_published_total", "kind" => "add").increment(1);
        info!(fare_type = %saved.fare_type, version = saved.version, "Pricing rule added");
        Ok(saved)
    }

    /// Publish a new version of an existing fare type.
    ///
    /// The previous versions stay in storage; they are superseded, not changed.
    pub async fn edit(&self, draft: RuleDraft) -> DomainResult<PricingRule> {
        draft.validate()?;

        let fare_type = draft.fare_type();
        let current = self.get_newest_version(&fare_type).await?;
        if current.tariff == draft.tariff {
            return Err(PricingError::RuleUnchanged(fare_type));
        }

        let version = current.version.checked_add(1).ok_or_else(|| {
            PricingError::InvalidRule(format!("version space of {} is exhausted", fare_type))
        })?;

        let saved = self.repo.insert(draft.publish(version, Utc::now())).await?;
        metrics::counter!("price_rules_published_total", "kind" => "edit").increment(1);
        info!(
            fare_type = %saved.fare_type,
            previous = current.version,
            version = saved.version,
            "Pricing rule edited"
        );
        Ok(saved)
    }
}

fn newest(rules: Vec<PricingRule>) -> Option<PricingRule> {
    rules.into_iter().max_by_key(|r| r.version)
}

// ── Tests ──────────────────────────────────────────────────────
