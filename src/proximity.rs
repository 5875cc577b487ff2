//! Great-circle proximity filtering over listing collections.
//!
//! Haversine on a 6371 km sphere; a full linear scan of the candidates.
//! Fine at the dataset sizes we serve — a spatial index can replace the
//! scan later behind the same `filter_within` contract.

use crate::geo::Coordinate;
use crate::listings::Listing;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Keep the candidates within `radius_km` of `center`, preserving input
/// order. Candidates without a usable coordinate are silently excluded —
/// "no location" is not an error.
pub fn filter_within(center: Coordinate, radius_km: f64, candidates: &[Listing]) -> Vec<Listing> {
    candidates
        .iter()
        .filter(|listing| match listing.coordinate() {
            Some(point) => haversine_km(center, point) <= radius_km,
            None => false,
        })
        .cloned()
        .collect()
}
