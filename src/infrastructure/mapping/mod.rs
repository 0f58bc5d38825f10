//! Mapping service adapters for [`RouteProvider`](crate::application::ports::RouteProvider)

mod fixed;
mod http;

pub use fixed::StaticRouteProvider;
pub use http::{HttpRouteProvider, MappingConfig};
