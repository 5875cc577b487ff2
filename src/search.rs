//! Nearby-search orchestration: postal code → coordinate → radius filter.

use crate::geo::{Coordinate, GeoError, Geocoder};
use crate::listings::{Listing, ListingStore};
use crate::proximity;

/// Search radius applied when the caller does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Find the listings within `radius_km` of a point.
///
/// Pure in-memory step over a store snapshot; an empty result means
/// "nothing nearby", not a failure.
pub fn find_near_coordinate(
    center: Coordinate,
    radius_km: f64,
    store: &dyn ListingStore,
) -> Vec<Listing> {
    let candidates = store.list_all();
    proximity::filter_within(center, radius_km, &candidates)
}

/// Find the listings within `radius_km` of a postal code.
///
/// Geocoding failures propagate unchanged; the caller distinguishes them
/// from an empty (but successful) result.
pub fn find_near_postal_code(
    geocoder: &Geocoder,
    store: &dyn ListingStore,
    postal_code: &str,
    radius_km: Option<f64>,
) -> Result<Vec<Listing>, GeoError> {
    let center = geocoder.resolve(postal_code)?;
    let radius = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    Ok(find_near_coordinate(center, radius, store))
}
