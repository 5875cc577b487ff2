mod handlers;
mod state;

use axum::Router;
use axum::routing::get;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::geo::Geocoder;
use crate::listings::ListingStore;

pub fn build_router(geocoder: Geocoder, store: Box<dyn ListingStore>) -> Router {
    let state = Arc::new(AppState { geocoder, store });

    Router::new()
        .route("/api/listings", get(handlers::list_all))
        .route("/api/listings/search", get(handlers::search_by_category))
        .route("/api/listings/near", get(handlers::list_near))
        .route("/api/listings/{id}", get(handlers::get_by_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, geocoder: Geocoder, store: Box<dyn ListingStore>) {
    let app = build_router(geocoder, store);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  Pousada server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        });
}
