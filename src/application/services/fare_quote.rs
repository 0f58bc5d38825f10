//! Fare quote orchestration
//!
//! Joins the mapping collaborator, the rule store and the calculator. The
//! calculator itself never does I/O; everything async lives here.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::{RouteProvider, RouteRequest};
use crate::application::services::PricingRuleStore;
use crate::domain::{
    DomainResult, FareCalculator, FareQuote, FareType, PricingError, TripDistanceDuration,
};
use crate::shared::{retry_with_backoff, RetryConfig};

/// A quote together with the trip it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripQuote {
    pub trip: TripDistanceDuration,
    pub quote: FareQuote,
}

/// Prices trips against the current rule of a fare type.
#[derive(Clone)]
pub struct FareQuoteService {
    routes: Arc<dyn RouteProvider>,
    rules: PricingRuleStore,
    calculator: FareCalculator,
    retry: RetryConfig,
}

impl FareQuoteService {
    pub fn new(routes: Arc<dyn RouteProvider>, rules: PricingRuleStore) -> Self {
        Self {
            routes,
            rules,
            calculator: FareCalculator::new(),
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy used around mapping calls.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Estimate the fare of a trip that has not happened yet.
    ///
    /// The route is resolved by the mapping service first, then priced with
    /// the newest rule of `fare_type`.
    #[instrument(skip(self, route, fare_type), fields(fare_type = %fare_type))]
    pub async fn forecast(&self, route: &RouteRequest, fare_type: &FareType) -> DomainResult<TripQuote> {
        let result = self.forecast_inner(route, fare_type).await;
        record_outcome("forecast", &result);
        result
    }

    /// Price a finished trip whose distance and duration are already known.
    #[instrument(skip(self, fare_type), fields(fare_type = %fare_type))]
    pub async fn calculate(
        &self,
        distance_meters: i64,
        duration_seconds: i64,
        fare_type: &FareType,
    ) -> DomainResult<TripQuote> {
        let result: DomainResult<TripQuote> = async {
            let trip = TripDistanceDuration::new(distance_meters, duration_seconds)?;
            self.price(trip, fare_type).await
        }
        .await;
        record_outcome("calculate", &result);
        result
    }

    async fn forecast_inner(&self, route: &RouteRequest, fare_type: &FareType) -> DomainResult<TripQuote> {
        let trip = retry_with_backoff(
            self.retry.clone(),
            || self.routes.direction(route),
            PricingError::is_transient,
            "route_direction",
        )
        .await?;
        debug!(
            distance_meters = trip.distance_meters,
            duration_seconds = trip.duration_seconds,
            "Route resolved"
        );

        self.price(trip, fare_type).await
    }

    async fn price(&self, trip: TripDistanceDuration, fare_type: &FareType) -> DomainResult<TripQuote> {
        let rule = self.rules.get_newest_version(fare_type).await?;
        let quote = self.calculator.calculate(&trip, &rule)?;

        info!(
            fare_version = quote.fare_version,
            amount = %quote.format_amount(),
            "Fare quoted"
        );
        Ok(TripQuote { trip, quote })
    }
}

fn record_outcome(kind: &'static str, result: &DomainResult<TripQuote>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => {
            warn!(kind, code = e.code(), error = %e, "Fare quote failed");
            e.code()
        }
    };
    metrics::counter!("fare_quotes_total", "kind" => kind, "outcome" => outcome).increment(1);
}

// ── Tests ──────────────────────────────────────────────────────
