use serde::{Deserialize, Serialize};
use serde_json::Value;

// Data structures for the one-way offer JSON the upstream provider returns.

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OneWayResponse {
    #[serde(default)]
    pub summary: OneWaySummary,
    #[serde(default)]
    pub options: Vec<RawOffer>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OneWaySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A single one-way offer as the provider sends it.
///
/// Timestamps are naive ISO-8601 datetime strings. Fields this crate does
/// not model ride along in `extra` and are preserved verbatim through
/// enrichment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawOffer {
    pub departure_time: String,
    pub arrival_time: String,
    #[serde(default)]
    pub price: RawPrice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct RawPrice {
    #[serde(default)]
    pub fare: f64,
}
