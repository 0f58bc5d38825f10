//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `modules`: handlers grouped by resource, plus middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiResponse, ValidatedJson};
pub use router::{create_api_router, ApiDoc, AppState};
