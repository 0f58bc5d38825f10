pub mod fares;
pub mod health;
pub mod metrics;
pub mod price_rules;
pub mod request_id;
