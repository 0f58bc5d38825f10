//! Database repository implementations

pub mod price_rule_repository;

pub use price_rule_repository::SeaOrmPricingRuleRepository;
