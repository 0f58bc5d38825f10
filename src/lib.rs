//! # Fare Service
//!
//! Fare estimation for a ride-hailing platform: prices trips against
//! versioned, per-city pricing rules.
//!
//! ## Architecture
//!
//! - **domain**: pricing rules, the fare calculator and domain errors
//! - **application**: rule store and quote orchestration, plus the ports
//!   they depend on
//! - **infrastructure**: SeaORM and in-memory rule storage, mapping service
//!   client
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;
pub mod support;

pub use config::{default_config_path, AppConfig, ConfigSource};

pub use application::{FareQuoteService, PricingRuleStore, RouteProvider, RouteRequest};
pub use domain::{FareCalculator, FareQuote, FareType, PricingError, PricingRule, RuleDraft, Tariff};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
