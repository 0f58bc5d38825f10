//! Infrastructure layer - external concerns

pub mod database;
pub mod mapping;
pub mod storage;

pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmPricingRuleRepository};
pub use mapping::{HttpRouteProvider, MappingConfig, StaticRouteProvider};
pub use storage::InMemoryPricingRuleRepository;
