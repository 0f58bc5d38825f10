//! Database entities module

pub mod price_rule;

pub use price_rule::Entity as PriceRule;
