//! Geocoding subsystem for Pousada.
//!
//! Resolves Brazilian postal codes (CEP) to WGS84 coordinates through a
//! primary provider (OpenCage) with a ViaCEP fallback existence check.

pub mod providers;
pub mod resolver;
pub mod types;

pub use resolver::{Geocoder, GeocoderConfig};
pub use types::{Coordinate, GeoError, PostalCode};
