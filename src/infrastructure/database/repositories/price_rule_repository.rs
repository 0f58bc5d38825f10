//! SeaORM implementation of PricingRuleRepository

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::debug;

use crate::domain::{DomainResult, FareType, PricingError, PricingRule, PricingRuleRepository, Tariff};
use crate::infrastructure::database::entities::price_rule;

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: DbErr) -> PricingError {
    PricingError::Storage(format!("Database error: {}", e))
}

fn parse_decimal(column: &str, raw: &str) -> DomainResult<Decimal> {
    Decimal::from_str(raw).map_err(|e| {
        PricingError::Storage(format!("Column {} holds invalid decimal {:?}: {}", column, raw, e))
    })
}

fn entity_to_domain(m: price_rule::Model) -> DomainResult<PricingRule> {
    Ok(PricingRule {
        tariff: Tariff {
            start_fare: parse_decimal("start_fare", &m.start_fare)?,
            start_mile_km: m.start_mile,
            unit_price_per_km: parse_decimal("unit_price_per_mile", &m.unit_price_per_mile)?,
            unit_price_per_minute: parse_decimal("unit_price_per_minute", &m.unit_price_per_minute)?,
        },
        city_code: m.city_code,
        vehicle_type: m.vehicle_type,
        fare_type: FareType::from(m.fare_type),
        version: m.fare_version,
        created_at: m.created_at,
    })
}

fn domain_to_active(rule: &PricingRule) -> price_rule::ActiveModel {
    price_rule::ActiveModel {
        id: NotSet,
        city_code: Set(rule.city_code.clone()),
        vehicle_type: Set(rule.vehicle_type.clone()),
        fare_type: Set(rule.fare_type.as_str().to_string()),
        fare_version: Set(rule.version),
        start_fare: Set(rule.start_fare().to_string()),
        start_mile: Set(rule.start_mile_km()),
        unit_price_per_mile: Set(rule.unit_price_per_km().to_string()),
        unit_price_per_minute: Set(rule.unit_price_per_minute().to_string()),
        created_at: Set(rule.created_at),
    }
}

// ── SeaOrmPricingRuleRepository ─────────────────────────────────

pub struct SeaOrmPricingRuleRepository {
    db: DatabaseConnection,
}

impl SeaOrmPricingRuleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PricingRuleRepository for SeaOrmPricingRuleRepository {
    async fn select_by_fare_type(&self, fare_type: &FareType) -> DomainResult<Vec<PricingRule>> {
        let models = price_rule::Entity::find()
            .filter(price_rule::Column::FareType.eq(fare_type.as_str()))
            .order_by_asc(price_rule::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn select_all(&self) -> DomainResult<Vec<PricingRule>> {
        let models = price_rule::Entity::find()
            .order_by_asc(price_rule::Column::FareType)
            .order_by_asc(price_rule::Column::FareVersion)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn insert(&self, rule: PricingRule) -> DomainResult<PricingRule> {
        let saved = domain_to_active(&rule)
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => PricingError::UniquenessViolation {
                    fare_type: rule.fare_type.clone(),
                    version: rule.version,
                },
                _ => db_err(e),
            })?;

        debug!(id = saved.id, fare_type = %saved.fare_type, version = saved.fare_version, "Price rule row inserted");
        entity_to_domain(saved)
    }
}

// ── Tests ──────────────────────────────────────────────────────
