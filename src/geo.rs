use serde::{Deserialize, Serialize};

// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface. Owned by the airport record it
/// describes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle distance between two coordinates in kilometers, using the
/// haversine formula.
///
/// Always finite and non-negative: 0 for identical coordinates, up to
/// roughly 20015 km for antipodal points.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let hav =
        (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * hav.sqrt().atan2((1.0 - hav).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const POA: Coordinate = Coordinate {
        latitude: -30.03,
        longitude: -51.23,
    };
    const MAO: Coordinate = Coordinate {
        latitude: -3.13,
        longitude: -60.02,
    };

    #[test]
    fn distance_between_poa_and_mao_is_over_3000_km() {
        let dist = distance_km(&POA, &MAO);
        assert!(dist > 3000.0, "got {dist}");
        assert!(dist < 3300.0, "got {dist}");
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance_km(&POA, &MAO), distance_km(&MAO, &POA));
    }

    #[test]
    fn identical_coordinates_are_zero_apart() {
        assert_eq!(distance_km(&POA, &POA), 0.0);
    }

    #[test]
    fn antipodal_points_span_half_the_circumference() {
        let a = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
        let b = Coordinate {
            latitude: 0.0,
            longitude: 180.0,
        };
        let dist = distance_km(&a, &b);
        assert!((dist - 20015.0).abs() < 1.0, "got {dist}");
    }
}
