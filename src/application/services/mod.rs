pub mod fare_quote;
pub mod pricing_rules;

pub use fare_quote::{FareQuoteService, TripQuote};
pub use pricing_rules::PricingRuleStore;
