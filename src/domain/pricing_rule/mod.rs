//! Pricing rule aggregate
//!
//! Contains the versioned tariff record and its storage contract.

pub mod model;
pub mod repository;

pub use model::{FareType, PricingRule, RuleDraft, Tariff};
pub use repository::PricingRuleRepository;
