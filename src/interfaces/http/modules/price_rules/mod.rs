//! Administrative pricing-rule endpoints

pub mod dto;
pub mod handlers;

pub use handlers::*;
