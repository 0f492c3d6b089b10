use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InvalidInput;
use crate::offer::RawOffer;
use crate::pricing::{self, round2, PriceBreakdown};

// Provider timestamps are naive ISO-8601, with or without fractional
// seconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Metadata derived from an offer and the route distance.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FlightMeta {
    pub range: i64,
    pub cruise_speed_kmh: i64,
    pub cost_per_km: f64,
}

/// A raw offer with its price replaced by the computed breakdown and the
/// flight metadata attached. Unmodeled provider fields are carried through
/// unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichedOffer {
    pub departure_time: String,
    pub arrival_time: String,
    pub price: PriceBreakdown,
    pub meta: FlightMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, InvalidInput> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| InvalidInput::BadTimestamp(raw.to_string()))
}

/// Attach the computed price and flight metadata to a raw one-way offer.
///
/// An offer that arrives before it departs is rejected; a zero route
/// distance yields the degenerate metadata triple, covering the
/// same-airport case the engine normally rejects upstream.
pub fn enrich(offer: &RawOffer, route_distance_km: f64) -> Result<EnrichedOffer, InvalidInput> {
    let price = pricing::price(offer.price.fare)?;

    let departure = parse_timestamp(&offer.departure_time)?;
    let arrival = parse_timestamp(&offer.arrival_time)?;
    if arrival < departure {
        return Err(InvalidInput::ArrivalBeforeDeparture {
            departure: offer.departure_time.clone(),
            arrival: offer.arrival_time.clone(),
        });
    }
    let duration_hours = (arrival - departure).num_seconds() as f64 / 3600.0;

    let meta = if route_distance_km == 0.0 {
        FlightMeta {
            range: 0,
            cruise_speed_kmh: 0,
            cost_per_km: 0.0,
        }
    } else {
        let cruise_speed_kmh = if duration_hours > 0.0 {
            (route_distance_km / duration_hours).round() as i64
        } else {
            0
        };
        FlightMeta {
            range: route_distance_km.round() as i64,
            cruise_speed_kmh,
            cost_per_km: round2(price.fare / route_distance_km),
        }
    };

    Ok(EnrichedOffer {
        departure_time: offer.departure_time.clone(),
        arrival_time: offer.arrival_time.clone(),
        price,
        meta,
        aircraft: offer.aircraft.clone(),
        extra: offer.extra.clone(),
    })
}

/// Enrich every offer of a provider response independently, preserving
/// input order. One enriched offer per raw offer.
pub fn enrich_all(
    offers: &[RawOffer],
    route_distance_km: f64,
) -> Result<Vec<EnrichedOffer>, InvalidInput> {
    offers
        .iter()
        .map(|offer| enrich(offer, route_distance_km))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::RawPrice;
    use serde_json::json;

    fn offer(departure_time: &str, arrival_time: &str, fare: f64) -> RawOffer {
        RawOffer {
            departure_time: departure_time.to_string(),
            arrival_time: arrival_time.to_string(),
            price: RawPrice { fare },
            aircraft: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn four_hour_flight_metadata() {
        let raw = offer("2025-12-20T10:00:00", "2025-12-20T14:00:00", 1200.0);
        let enriched = enrich(&raw, 3130.0).unwrap();

        assert_eq!(enriched.price.fare, 1200.0);
        assert_eq!(enriched.price.fee, 120.0);
        assert_eq!(enriched.price.total, 1320.0);
        assert_eq!(enriched.meta.range, 3130);
        // 3130 / 4 = 782.5, which rounds half-up to 783.
        assert_eq!(enriched.meta.cruise_speed_kmh, 783);
        assert_eq!(enriched.meta.cost_per_km, 0.38);
    }

    #[test]
    fn zero_distance_yields_degenerate_metadata() {
        let raw = offer("2025-12-20T10:00:00", "2025-12-20T14:00:00", 1200.0);
        let enriched = enrich(&raw, 0.0).unwrap();
        assert_eq!(
            enriched.meta,
            FlightMeta {
                range: 0,
                cruise_speed_kmh: 0,
                cost_per_km: 0.0
            }
        );
    }

    #[test]
    fn zero_duration_yields_zero_cruise_speed() {
        let raw = offer("2025-12-20T10:00:00", "2025-12-20T10:00:00", 500.0);
        let enriched = enrich(&raw, 100.0).unwrap();
        assert_eq!(enriched.meta.range, 100);
        assert_eq!(enriched.meta.cruise_speed_kmh, 0);
        assert_eq!(enriched.meta.cost_per_km, 5.0);
    }

    #[test]
    fn arrival_before_departure_is_rejected() {
        let raw = offer("2025-12-20T14:00:00", "2025-12-20T10:00:00", 500.0);
        let err = enrich(&raw, 3130.0).unwrap_err();
        assert!(matches!(err, InvalidInput::ArrivalBeforeDeparture { .. }));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let raw = offer("not-a-timestamp", "2025-12-20T14:00:00", 500.0);
        let err = enrich(&raw, 3130.0).unwrap_err();
        assert_eq!(err, InvalidInput::BadTimestamp("not-a-timestamp".into()));
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let raw = offer("2025-12-20T10:00:00.500", "2025-12-20T14:00:00", 500.0);
        assert!(enrich(&raw, 3130.0).is_ok());
    }

    #[test]
    fn enrich_all_preserves_order_and_cardinality() {
        let offers = vec![
            offer("2025-12-20T10:00:00", "2025-12-20T14:00:00", 1200.0),
            offer("2025-12-20T12:00:00", "2025-12-20T16:00:00", 1350.5),
        ];
        let enriched = enrich_all(&offers, 3130.0).unwrap();
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].departure_time, "2025-12-20T10:00:00");
        assert_eq!(enriched[1].departure_time, "2025-12-20T12:00:00");
    }

    #[test]
    fn provider_fields_pass_through_enrichment() {
        let raw: RawOffer = serde_json::from_value(json!({
            "departure_time": "2025-12-20T10:00:00",
            "arrival_time": "2025-12-20T14:00:00",
            "price": {"fare": 1200.0},
            "aircraft": {"model": "B737"},
            "flight_number": "G3 1234"
        }))
        .unwrap();

        let enriched = enrich(&raw, 3130.0).unwrap();
        let payload = serde_json::to_value(&enriched).unwrap();
        assert_eq!(payload["aircraft"], json!({"model": "B737"}));
        assert_eq!(payload["flight_number"], json!("G3 1234"));
        // The raw price object is replaced by the full breakdown.
        assert_eq!(
            payload["price"],
            json!({"fare": 1200.0, "fee": 120.0, "total": 1320.0})
        );
    }
}
