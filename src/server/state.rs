use crate::geo::Geocoder;
use crate::listings::ListingStore;

pub struct AppState {
    pub geocoder: Geocoder,
    pub store: Box<dyn ListingStore>,
}
