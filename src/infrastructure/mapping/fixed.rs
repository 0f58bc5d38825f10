//! Route provider with canned answers, for development and tests

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{RouteProvider, RouteRequest};
use crate::domain::{DomainResult, TripDistanceDuration};

/// Answers every route with a fixed distance and duration, unless a
/// specific route was registered with [`StaticRouteProvider::with_route`].
#[derive(Debug, Clone)]
pub struct StaticRouteProvider {
    default: TripDistanceDuration,
    routes: HashMap<RouteKey, TripDistanceDuration>,
}

type RouteKey = (String, String, String, String);

fn key(route: &RouteRequest) -> RouteKey {
    (
        route.dep_longitude.clone(),
        route.dep_latitude.clone(),
        route.dest_longitude.clone(),
        route.dest_latitude.clone(),
    )
}

impl StaticRouteProvider {
    pub fn new(default: TripDistanceDuration) -> Self {
        Self {
            default,
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, route: &RouteRequest, trip: TripDistanceDuration) -> Self {
        self.routes.insert(key(route), trip);
        self
    }
}

#[async_trait]
impl RouteProvider for StaticRouteProvider {
    async fn direction(&self, route: &RouteRequest) -> DomainResult<TripDistanceDuration> {
        Ok(self.routes.get(&key(route)).copied().unwrap_or(self.default))
    }
}
