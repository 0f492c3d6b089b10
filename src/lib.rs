// Round-trip flight combination search: aggregates one-way offers from an
// upstream provider, enriches them with computed pricing and flight
// metadata, and ranks every outbound/inbound pairing by total price.

pub mod airports;
pub mod enrich;
pub mod error;
pub mod geo;
pub mod import;
pub mod offer;
pub mod pricing;
pub mod provider;
pub mod search;

// Re-export key types for convenience
pub use airports::{Airport, AirportDirectory, InMemoryAirportDirectory};
pub use enrich::{enrich, enrich_all, EnrichedOffer, FlightMeta};
pub use error::{ErrorKind, InvalidInput, SearchError, UpstreamError, ValidationError};
pub use geo::{distance_km, Coordinate};
pub use import::{apply_feed, import_airports, ImportConfig, ImportReport, ImportStatus};
pub use offer::{OneWayResponse, OneWaySummary, RawOffer, RawPrice};
pub use pricing::{price, PriceBreakdown};
pub use provider::{HttpOfferProvider, OfferProvider, ProviderConfig};
pub use search::{
    build_combinations, Clock, Combination, CombinationEngine, CombinedPrice, SearchResult,
    SearchSummary, SystemClock,
};
