//! Outbound ports: collaborators the fare service calls
//!
//! [`RouteProvider`] decouples quote orchestration from the concrete mapping
//! service. Production uses
//! [`HttpRouteProvider`](crate::infrastructure::mapping::HttpRouteProvider);
//! development and tests use
//! [`StaticRouteProvider`](crate::infrastructure::mapping::StaticRouteProvider).

use async_trait::async_trait;

use crate::domain::{DomainResult, TripDistanceDuration};

/// Origin and destination of a trip.
///
/// Coordinates are kept as the decimal strings the caller sent; validating
/// and geocoding them is the mapping service's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub dep_longitude: String,
    pub dep_latitude: String,
    pub dest_longitude: String,
    pub dest_latitude: String,
}

/// Resolves the driving distance and duration between two points.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn direction(&self, route: &RouteRequest) -> DomainResult<TripDistanceDuration>;
}
