//! Fare aggregate
//!
//! Trip measurements, fare quotes and the calculator that links them.

pub mod calculator;
pub mod model;

pub use calculator::{round_half_up, FareCalculator};
pub use model::{FareBreakdown, FareQuote, TripDistanceDuration};
