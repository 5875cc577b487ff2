//! Core types for the geocoding subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized Brazilian postal code (CEP): exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode(String);

impl PostalCode {
    /// Normalize and validate raw input.
    ///
    /// Trims surrounding whitespace and strips a single literal `-`
    /// separator ("01310-100" → "01310100"), then requires exactly eight
    /// digits. Rejection happens here, before any network call is made.
    pub fn parse(raw: &str) -> Result<Self, GeoError> {
        let normalized = raw.trim().replacen('-', "", 1);

        let valid = normalized.len() == 8 && normalized.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(GeoError::InvalidPostalCode(raw.trim().to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved WGS84 point in decimal degrees. Both fields are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate, refusing non-finite components.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// Geocoding errors.
#[derive(Debug)]
pub enum GeoError {
    /// Malformed postal code — rejected before any I/O.
    InvalidPostalCode(String),
    /// Both providers exhausted without usable coordinates.
    PostalCodeNotFound(String),
    /// Transport failure from a provider (single attempt, no retry).
    Network(String),
    /// Provider replied with a payload we could not decode.
    InvalidResponse(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPostalCode(raw) => {
                write!(f, "Invalid postal code '{}': expected 8 digits (e.g. 01310-100)", raw)
            }
            Self::PostalCodeNotFound(cep) => {
                write!(f, "No location found for postal code '{}'", cep)
            }
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid provider response: {}", msg),
        }
    }
}

impl std::error::Error for GeoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_separator() {
        let cep = PostalCode::parse("01310-100").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_parse_without_separator() {
        let cep = PostalCode::parse("01310100").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let cep = PostalCode::parse("  01310-100  ").unwrap();
        assert_eq!(cep.as_str(), "01310100");
    }

    #[test]
    fn test_parse_separator_variants_normalize_identically() {
        let with = PostalCode::parse("22041-011").unwrap();
        let without = PostalCode::parse("22041011").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_parse_rejects_short() {
        assert!(PostalCode::parse("1310100").is_err());
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(PostalCode::parse("0131010a").is_err());
    }

    #[test]
    fn test_parse_rejects_double_separator() {
        // Only one separator is stripped; a second one fails the digit check.
        assert!(PostalCode::parse("013-10-100").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(PostalCode::parse("").is_err());
        assert!(PostalCode::parse("   ").is_err());
    }

    #[test]
    fn test_coordinate_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_none());
        assert!(Coordinate::new(-23.56, -46.65).is_some());
    }
}
