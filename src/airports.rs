use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// An airport record. Looked up by the search core, never mutated by it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Airport {
    pub iata: String,
    pub city: String,
    pub state: String,
    pub coordinate: Coordinate,
}

/// Resolves a 3-letter airport code to its record. Lookup is
/// case-insensitive exact match.
pub trait AirportDirectory: Send + Sync + 'static {
    fn lookup(&self, code: &str) -> Option<Airport>;
}

/// Airport directory backed by a concurrent map keyed by uppercased IATA
/// code.
#[derive(Debug, Default)]
pub struct InMemoryAirportDirectory {
    airports: DashMap<String, Airport>,
}

impl InMemoryAirportDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record. Returns true when the code was new.
    pub fn upsert(&self, airport: Airport) -> bool {
        let key = airport.iata.to_ascii_uppercase();
        self.airports.insert(key, airport).is_none()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl AirportDirectory for InMemoryAirportDirectory {
    fn lookup(&self, code: &str) -> Option<Airport> {
        self.airports
            .get(&code.to_ascii_uppercase())
            .map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poa() -> Airport {
        Airport {
            iata: "POA".to_string(),
            city: "Porto Alegre".to_string(),
            state: "RS".to_string(),
            coordinate: Coordinate {
                latitude: -30.03,
                longitude: -51.23,
            },
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let directory = InMemoryAirportDirectory::new();
        directory.upsert(poa());

        assert!(directory.lookup("POA").is_some());
        assert!(directory.lookup("poa").is_some());
        assert!(directory.lookup("Poa").is_some());
        assert!(directory.lookup("GRU").is_none());
    }

    #[test]
    fn upsert_distinguishes_created_from_updated() {
        let directory = InMemoryAirportDirectory::new();
        assert!(directory.upsert(poa()));

        let mut renamed = poa();
        renamed.city = "Porto Alegre - Salgado Filho".to_string();
        assert!(!directory.upsert(renamed.clone()));

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup("poa"), Some(renamed));
    }
}
