//! Pousada — lodging listings with postal-code proximity search.
//!
//! Resolves a Brazilian CEP to coordinates through a primary geocoding
//! provider (with a ViaCEP fallback existence check), then filters the
//! listing collection by great-circle distance. Ships a JSON HTTP API
//! and a one-shot CLI over the same core.

pub mod geo;
pub mod listings;
pub mod proximity;
pub mod search;
pub mod server;
