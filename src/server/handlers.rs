use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::geo::GeoError;
use crate::listings::{Category, Listing};
use crate::search;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Map geocoding failures to HTTP statuses. Upstream detail goes to the
/// log only; callers get a generic body.
fn geo_api_error(err: GeoError) -> ApiError {
    match err {
        GeoError::InvalidPostalCode(_) => api_error(StatusCode::BAD_REQUEST, format!("{}", err)),
        GeoError::PostalCodeNotFound(_) => api_error(StatusCode::NOT_FOUND, format!("{}", err)),
        GeoError::Network(detail) | GeoError::InvalidResponse(detail) => {
            eprintln!("[{}] geocoding provider failure: {}", Utc::now().format("%H:%M:%S"), detail);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Geocoding service unavailable")
        }
    }
}

fn log_request(route: &str, detail: &str, hits: usize, start: Instant) {
    eprintln!(
        "[{}] GET {}{} -> {} listings ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        route,
        detail,
        hits,
        start.elapsed().as_secs_f64() * 1000.0,
    );
}

// ─── GET /api/listings ───────────────────────────────────────────

pub async fn list_all(State(state): State<Arc<AppState>>) -> Json<Vec<Listing>> {
    let start = Instant::now();
    let listings = state.store.list_all();
    log_request("/api/listings", "", listings.len(), start);
    Json(listings)
}

// ─── GET /api/listings/search ────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub category: Option<String>,
}

pub async fn search_by_category(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let start = Instant::now();

    let raw = params
        .category
        .as_deref()
        .unwrap_or("")
        .trim();
    if raw.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'category' parameter"));
    }

    let category: Category = raw
        .parse()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("{}", e)))?;

    let listings = state.store.list_by_category(category);
    log_request("/api/listings/search", &format!("?category={}", category), listings.len(), start);
    Ok(Json(listings))
}

// ─── GET /api/listings/near ──────────────────────────────────────

#[derive(Deserialize)]
pub struct NearQuery {
    pub postal_code: Option<String>,
    pub radius: Option<f64>,
}

pub async fn list_near(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearQuery>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let start = Instant::now();

    let postal_code = params.postal_code.as_deref().unwrap_or("").trim();
    if postal_code.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'postal_code' parameter"));
    }

    if let Some(radius) = params.radius {
        if !radius.is_finite() || radius < 0.0 {
            return Err(api_error(StatusCode::BAD_REQUEST, "Radius must be a non-negative number of kilometers"));
        }
    }

    let listings = search::find_near_postal_code(
        &state.geocoder,
        state.store.as_ref(),
        postal_code,
        params.radius,
    )
    .map_err(geo_api_error)?;

    log_request(
        "/api/listings/near",
        &format!("?postal_code={}&radius={}", postal_code, params.radius.unwrap_or(search::DEFAULT_RADIUS_KM)),
        listings.len(),
        start,
    );
    Ok(Json(listings))
}

// ─── GET /api/listings/{id} ──────────────────────────────────────

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    let start = Instant::now();

    let id: u64 = id
        .trim()
        .parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, format!("Invalid listing id '{}'", id)))?;

    let listing = state
        .store
        .get_by_id(id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No listing with id {}", id)))?;

    log_request("/api/listings/", &format!("{}", id), 1, start);
    Ok(Json(listing))
}
