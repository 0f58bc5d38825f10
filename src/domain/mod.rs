//! Core business types of the fare service.
//!
//! Pure logic only: no I/O happens in this module except through the
//! repository trait it defines.

pub mod error;
pub mod fare;
pub mod pricing_rule;

// Re-export commonly used types
pub use error::{DomainResult, PricingError};
pub use fare::{FareBreakdown, FareCalculator, FareQuote, TripDistanceDuration};
pub use pricing_rule::{FareType, PricingRule, PricingRuleRepository, RuleDraft, Tariff};
