pub mod retry;
pub mod validations;

pub use retry::{retry_with_backoff, RetryConfig};
