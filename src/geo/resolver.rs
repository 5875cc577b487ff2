//! Geocoder — orchestrates the provider fallback chain.
//!
//! Flow:  validate CEP → OpenCage (first geometry wins) → ViaCEP existence
//! check → error. Each provider is attempted exactly once, sequentially.

use super::providers;
use super::types::{Coordinate, GeoError, PostalCode};
use std::time::Duration;

/// Provider endpoints and credentials, injected at construction so they
/// can be swapped per environment.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub opencage_url: String,
    pub viacep_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GeocoderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            opencage_url: "https://api.opencagedata.com/geocode/v1/json".into(),
            viacep_url: "https://viacep.com.br/ws".into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Read the API key from `OPENCAGE_API_KEY`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var("OPENCAGE_API_KEY").ok().map(Self::new)
    }
}

/// The postal-code geocoder.
pub struct Geocoder {
    config: GeocoderConfig,
}

impl Geocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Resolve a raw postal code to a coordinate.
    ///
    /// Invalid input fails with zero network calls. A primary hit returns
    /// immediately without consulting the secondary. ViaCEP carries no
    /// geometry, so even a confirmed CEP on the fallback path ends in
    /// `PostalCodeNotFound` — never a placeholder coordinate.
    pub fn resolve(&self, raw: &str) -> Result<Coordinate, GeoError> {
        let cep = PostalCode::parse(raw)?;

        if let Some(coord) = providers::opencage_lookup(&self.config, &cep)? {
            return Ok(coord);
        }

        eprintln!("  Primary geocoder had no result for {}; checking ViaCEP", cep);

        if providers::viacep_lookup(&self.config, &cep)? {
            eprintln!("  ViaCEP knows {} but supplies no coordinates", cep);
        }

        Err(GeoError::PostalCodeNotFound(cep.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_geocoder() -> Geocoder {
        // Endpoints that would fail instantly if ever contacted.
        let config = GeocoderConfig {
            opencage_url: "http://127.0.0.1:1/geocode".into(),
            viacep_url: "http://127.0.0.1:1/ws".into(),
            api_key: "test-key".into(),
            timeout: Duration::from_millis(100),
        };
        Geocoder::new(config)
    }

    #[test]
    fn test_invalid_cep_short_circuits_before_network() {
        // With unreachable providers, any network attempt would surface as
        // GeoError::Network — InvalidPostalCode proves no call was made.
        let geocoder = unreachable_geocoder();
        match geocoder.resolve("abc") {
            Err(GeoError::InvalidPostalCode(_)) => {}
            other => panic!("expected InvalidPostalCode, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_cep_with_extra_separator() {
        let geocoder = unreachable_geocoder();
        assert!(matches!(
            geocoder.resolve("013-10-100"),
            Err(GeoError::InvalidPostalCode(_))
        ));
    }

    #[test]
    fn test_default_config_endpoints() {
        let config = GeocoderConfig::new("k");
        assert!(config.opencage_url.contains("opencagedata.com"));
        assert!(config.viacep_url.contains("viacep.com.br"));
    }
}
