//! Geocoding providers: OpenCage (primary) and ViaCEP (secondary).
//!
//! Each provider gets exactly one attempt per resolution, with a bounded
//! per-call timeout. OpenCage returns full geometry; ViaCEP only knows
//! whether the postal code exists.

use super::resolver::GeocoderConfig;
use super::types::{Coordinate, GeoError, PostalCode};
use serde::Deserialize;

const USER_AGENT: &str = "Pousada/0.3 (lodging-search)";

// ─── OpenCage (primary) ─────────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct OpenCageResponse {
    #[serde(default)]
    pub results: Vec<OpenCageResult>,
}

#[derive(Deserialize, Debug)]
pub struct OpenCageResult {
    pub geometry: OpenCageGeometry,
}

#[derive(Deserialize, Debug)]
pub struct OpenCageGeometry {
    pub lat: f64,
    pub lng: f64,
}

/// Pick the coordinate of the first result, if any.
///
/// Non-finite geometry is treated the same as an empty result set so a
/// broken payload falls through to the secondary provider instead of
/// leaking a bogus point downstream.
pub fn first_geometry(response: &OpenCageResponse) -> Option<Coordinate> {
    let first = response.results.first()?;
    Coordinate::new(first.geometry.lat, first.geometry.lng)
}

/// Query OpenCage for a normalized postal code.
///
/// `Ok(Some(coord))` on a hit, `Ok(None)` on zero results.
pub fn opencage_lookup(
    config: &GeocoderConfig,
    cep: &PostalCode,
) -> Result<Option<Coordinate>, GeoError> {
    let url = format!(
        "{}?q={}&key={}&countrycode=br&limit=1",
        config.opencage_url, cep, config.api_key,
    );

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(config.timeout)
        .call()
        .map_err(|e| GeoError::Network(e.to_string()))?;

    let parsed: OpenCageResponse = response
        .into_json()
        .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

    Ok(first_geometry(&parsed))
}

// ─── ViaCEP (secondary) ─────────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct ViaCepResponse {
    #[serde(default)]
    pub erro: bool,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
}

/// Whether ViaCEP recognized the postal code.
pub fn viacep_found(response: &ViaCepResponse) -> bool {
    !response.erro
}

/// Ask ViaCEP whether a postal code exists.
///
/// ViaCEP responses carry address text but no lat/lng, so this is an
/// existence check only — the caller can never mint a coordinate from it.
pub fn viacep_lookup(config: &GeocoderConfig, cep: &PostalCode) -> Result<bool, GeoError> {
    let url = format!("{}/{}/json/", config.viacep_url, cep);

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(config.timeout)
        .call()
        .map_err(|e| GeoError::Network(e.to_string()))?;

    let parsed: ViaCepResponse = response
        .into_json()
        .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

    Ok(viacep_found(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opencage_first_geometry() {
        let payload = json!({
            "results": [
                { "geometry": { "lat": -23.56, "lng": -46.65 } },
                { "geometry": { "lat": 0.0, "lng": 0.0 } }
            ]
        });
        let response: OpenCageResponse = serde_json::from_value(payload).unwrap();
        let coord = first_geometry(&response).unwrap();
        assert_eq!(coord.lat, -23.56);
        assert_eq!(coord.lng, -46.65);
    }

    #[test]
    fn test_opencage_empty_results() {
        let response: OpenCageResponse = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert!(first_geometry(&response).is_none());
    }

    #[test]
    fn test_opencage_missing_results_field() {
        let response: OpenCageResponse = serde_json::from_value(json!({})).unwrap();
        assert!(first_geometry(&response).is_none());
    }

    #[test]
    fn test_viacep_hit() {
        let payload = json!({
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "localidade": "São Paulo",
            "uf": "SP"
        });
        let response: ViaCepResponse = serde_json::from_value(payload).unwrap();
        assert!(viacep_found(&response));
        assert_eq!(response.localidade.as_deref(), Some("São Paulo"));
    }

    #[test]
    fn test_viacep_not_found_flag() {
        let response: ViaCepResponse = serde_json::from_value(json!({ "erro": true })).unwrap();
        assert!(!viacep_found(&response));
    }
}
