//! Application layer
//!
//! - `ports`: traits for the collaborators the services call out to
//! - `services`: rule store and quote orchestration

pub mod ports;
pub mod services;

pub use ports::{RouteProvider, RouteRequest};
pub use services::{FareQuoteService, PricingRuleStore, TripQuote};
