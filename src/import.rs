use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::airports::{Airport, InMemoryAirportDirectory};
use crate::error::UpstreamError;
use crate::geo::Coordinate;

// Connection settings for the airport feed endpoint.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub feed_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Success,
    Failed,
}

/// Outcome of one import run. Produced whether or not the feed could be
/// fetched.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub status: ImportStatus,
    pub created: usize,
    pub updated: usize,
    pub created_iatas: Vec<String>,
    pub updated_iatas: Vec<String>,
    pub details: String,
}

/// One record of the upstream feed. The feed is a JSON object keyed by an
/// arbitrary id; records without an IATA code are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct AirportFeedRecord {
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

/// Upsert every feed record with a non-empty IATA code into the directory.
/// Returns the created and updated code lists in feed key order.
pub fn apply_feed(
    directory: &InMemoryAirportDirectory,
    feed: BTreeMap<String, AirportFeedRecord>,
) -> (Vec<String>, Vec<String>) {
    let mut created = Vec::new();
    let mut updated = Vec::new();
    for record in feed.into_values() {
        let Some(iata) = record.iata.filter(|code| !code.is_empty()) else {
            continue;
        };
        let airport = Airport {
            iata: iata.clone(),
            city: record.city,
            state: record.state,
            coordinate: Coordinate {
                latitude: record.lat,
                longitude: record.lon,
            },
        };
        if directory.upsert(airport) {
            created.push(iata);
        } else {
            updated.push(iata);
        }
    }
    (created, updated)
}

/// Fetch the airport feed and load it into the directory.
///
/// A fetch failure yields a `Failed` report carrying the error details; the
/// outcome is recorded either way so callers can surface import history.
pub async fn import_airports(
    directory: &InMemoryAirportDirectory,
    config: &ImportConfig,
) -> ImportReport {
    match fetch_feed(config).await {
        Ok(feed) => {
            let total = feed.len();
            let (created_iatas, updated_iatas) = apply_feed(directory, feed);
            info!(
                created = created_iatas.len(),
                updated = updated_iatas.len(),
                "airport feed import finished"
            );
            ImportReport {
                status: ImportStatus::Success,
                created: created_iatas.len(),
                updated: updated_iatas.len(),
                created_iatas,
                updated_iatas,
                details: format!("Successfully processed {total} airports."),
            }
        }
        Err(err) => {
            warn!(error = %err, "airport feed import failed");
            ImportReport {
                status: ImportStatus::Failed,
                created: 0,
                updated: 0,
                created_iatas: Vec::new(),
                updated_iatas: Vec::new(),
                details: format!("Failed to fetch data from API: {err}"),
            }
        }
    }
}

async fn fetch_feed(
    config: &ImportConfig,
) -> Result<BTreeMap<String, AirportFeedRecord>, UpstreamError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()?;
    let response = client
        .get(&config.feed_url)
        .basic_auth(&config.username, Some(&config.password))
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status.as_u16()));
    }
    Ok(response.json().await?)
}
