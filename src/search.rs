use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::airports::{Airport, AirportDirectory};
use crate::enrich::{self, EnrichedOffer};
use crate::error::{SearchError, ValidationError};
use crate::geo;
use crate::offer::OneWayResponse;
use crate::pricing::round2;
use crate::provider::OfferProvider;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_CURRENCY: &str = "BRL";

/// Source of "today" for past-date validation. Injected so searches stay
/// testable with fixed dates.
pub trait Clock: Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchSummary {
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub total_outbound_options: usize,
    pub total_inbound_options: usize,
    pub total_combinations: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CombinedPrice {
    pub total: f64,
    pub currency: String,
}

/// One purchasable round-trip itinerary: an outbound offer paired with an
/// inbound offer and their combined price.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Combination {
    pub outbound_flight: EnrichedOffer,
    pub inbound_flight: EnrichedOffer,
    pub price: CombinedPrice,
}

/// The full search payload handed back to the caller. Built once per
/// request, never persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub summary: SearchSummary,
    pub outbound_options: Vec<EnrichedOffer>,
    pub inbound_options: Vec<EnrichedOffer>,
    pub combinations: Vec<Combination>,
}

/// Pair every outbound offer with every inbound offer and price the pair.
///
/// The result is sorted ascending by combined total. The sort is stable,
/// so ties keep the outbound-major, inbound-minor enumeration order.
pub fn build_combinations(
    outbound: &[EnrichedOffer],
    inbound: &[EnrichedOffer],
    currency: &str,
) -> Vec<Combination> {
    let mut combinations = Vec::with_capacity(outbound.len() * inbound.len());
    for outbound_flight in outbound {
        for inbound_flight in inbound {
            combinations.push(Combination {
                outbound_flight: outbound_flight.clone(),
                inbound_flight: inbound_flight.clone(),
                price: CombinedPrice {
                    total: round2(outbound_flight.price.total + inbound_flight.price.total),
                    currency: currency.to_string(),
                },
            });
        }
    }
    combinations.sort_by(|a, b| a.price.total.total_cmp(&b.price.total));
    combinations
}

/// Top-level entry point: validates the request, resolves both airports,
/// fetches both legs, enriches every offer and assembles the ranked
/// combinations.
pub struct CombinationEngine {
    directory: Arc<dyn AirportDirectory>,
    provider: Arc<dyn OfferProvider>,
    clock: Arc<dyn Clock>,
}

impl CombinationEngine {
    pub fn new(directory: Arc<dyn AirportDirectory>, provider: Arc<dyn OfferProvider>) -> Self {
        Self::with_clock(directory, provider, Arc::new(SystemClock))
    }

    pub fn with_clock(
        directory: Arc<dyn AirportDirectory>,
        provider: Arc<dyn OfferProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            provider,
            clock,
        }
    }

    /// Search round-trip combinations for a route and date pair.
    ///
    /// Validation checks run in a fixed order and the first failure wins:
    /// missing parameters, same airport, date format, departure in the
    /// past, return before departure, unknown airport. A provider failure
    /// on either leg aborts the whole request; nothing is retried.
    pub async fn find_combinations(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
        return_date: &str,
    ) -> Result<SearchResult, SearchError> {
        if origin.is_empty()
            || destination.is_empty()
            || departure_date.is_empty()
            || return_date.is_empty()
        {
            return Err(ValidationError::MissingParameter.into());
        }
        if origin.eq_ignore_ascii_case(destination) {
            return Err(ValidationError::SameAirport.into());
        }

        let departure = parse_date(departure_date)?;
        let return_day = parse_date(return_date)?;

        if departure < self.clock.today() {
            return Err(ValidationError::DepartureInPast.into());
        }
        // Same-day returns are allowed.
        if return_day < departure {
            return Err(ValidationError::ReturnBeforeDeparture.into());
        }

        let origin_airport = self.resolve(origin)?;
        let destination_airport = self.resolve(destination)?;

        let distance_km = geo::distance_km(
            &origin_airport.coordinate,
            &destination_airport.coordinate,
        );
        debug!(
            origin = %origin_airport.iata,
            destination = %destination_airport.iata,
            distance_km,
            "resolved route"
        );

        // Both legs are fetched concurrently; the first failure aborts the
        // request without waiting for the other leg.
        let (outbound_response, inbound_response) = futures::try_join!(
            self.provider
                .fetch_one_way(origin, destination, departure_date),
            self.provider
                .fetch_one_way(destination, origin, return_date),
        )?;

        // The route distance is symmetric, so it enriches both legs.
        let outbound = self.enrich_leg(&outbound_response, distance_km)?;
        let inbound = self.enrich_leg(&inbound_response, distance_km)?;

        let currency = outbound_response
            .summary
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let combinations = build_combinations(&outbound, &inbound, &currency);

        Ok(SearchResult {
            summary: SearchSummary {
                origin: origin.to_ascii_uppercase(),
                destination: destination.to_ascii_uppercase(),
                departure_date: departure_date.to_string(),
                return_date: return_date.to_string(),
                total_outbound_options: outbound.len(),
                total_inbound_options: inbound.len(),
                total_combinations: combinations.len(),
            },
            outbound_options: outbound,
            inbound_options: inbound,
            combinations,
        })
    }

    fn resolve(&self, code: &str) -> Result<Airport, ValidationError> {
        self.directory.lookup(code).ok_or_else(|| {
            warn!(code, "airport lookup failed");
            ValidationError::AirportNotFound
        })
    }

    fn enrich_leg(
        &self,
        response: &OneWayResponse,
        distance_km: f64,
    ) -> Result<Vec<EnrichedOffer>, SearchError> {
        enrich::enrich_all(&response.options, distance_km).map_err(|err| {
            warn!(error = %err, "provider returned an invalid offer");
            err.into()
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValidationError::BadDateFormat)
}
