//! Listing model, category enumeration, and the listings store.
//!
//! The store is a thin collaborator: `list_all`, `list_by_category`,
//! `get_by_id`. The in-memory implementation can be seeded from a JSON
//! file or from the built-in sample dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::geo::Coordinate;

/// Lodging categories. The single authoritative membership check shared by
/// every entry point — CLI and HTTP both validate through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hotel,
    Hostel,
    Apartment,
    Resort,
    Inn,
    Motel,
    Guesthouse,
    Villa,
    Cottage,
    Cabin,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Self::Hotel,
        Self::Hostel,
        Self::Apartment,
        Self::Resort,
        Self::Inn,
        Self::Motel,
        Self::Guesthouse,
        Self::Villa,
        Self::Cottage,
        Self::Cabin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Hostel => "hostel",
            Self::Apartment => "apartment",
            Self::Resort => "resort",
            Self::Inn => "inn",
            Self::Motel => "motel",
            Self::Guesthouse => "guesthouse",
            Self::Villa => "villa",
            Self::Cottage => "cottage",
            Self::Cabin => "cabin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| InvalidCategory(s.trim().to_string()))
    }
}

/// Rejection of a category outside the closed enumeration.
#[derive(Debug)]
pub struct InvalidCategory(pub String);

impl fmt::Display for InvalidCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}'. Expected one of: {}",
            self.0,
            Category::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl std::error::Error for InvalidCategory {}

/// A lodging record from the store.
///
/// `lat`/`lng` are optional: listings without coordinates stay visible in
/// the plain listing operations but can never appear in proximity results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Listing {
    /// The listing's coordinate, if both fields are present and finite.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.lat?, self.lng?)
    }
}

/// Read-only listings store collaborator.
pub trait ListingStore: Send + Sync {
    fn list_all(&self) -> Vec<Listing>;
    fn list_by_category(&self, category: Category) -> Vec<Listing>;
    fn get_by_id(&self, id: u64) -> Option<Listing>;
}

/// In-memory store backed by a plain vector.
pub struct MemoryStore {
    listings: Vec<Listing>,
}

impl MemoryStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Load listings from a JSON array file.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError(format!("cannot read {}: {}", path.display(), e)))?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)
            .map_err(|e| StoreError(format!("cannot parse {}: {}", path.display(), e)))?;
        Ok(Self::new(listings))
    }

    /// Built-in sample dataset (São Paulo and Rio de Janeiro).
    pub fn sample() -> Self {
        let json = include_str!("sample_listings.json");
        let listings = serde_json::from_str(json).unwrap_or_default();
        Self::new(listings)
    }
}

impl ListingStore for MemoryStore {
    fn list_all(&self) -> Vec<Listing> {
        self.listings.clone()
    }

    fn list_by_category(&self, category: Category) -> Vec<Listing> {
        self.listings
            .iter()
            .filter(|l| l.category == category)
            .cloned()
            .collect()
    }

    fn get_by_id(&self, id: u64) -> Option<Listing> {
        self.listings.iter().find(|l| l.id == id).cloned()
    }
}

/// Store loading/parsing failure.
#[derive(Debug)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listing store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_category_from_str_all_members() {
        for c in Category::ALL {
            let parsed: Category = c.as_str().parse().unwrap();
            assert_eq!(parsed, *c);
        }
    }

    #[test]
    fn test_category_case_insensitive() {
        assert_eq!("HOTEL".parse::<Category>().unwrap(), Category::Hotel);
        assert_eq!(" Guesthouse ".parse::<Category>().unwrap(), Category::Guesthouse);
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!("CASTLE".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_listing_coordinate_requires_both_fields() {
        let mut listing = sample_listing();
        assert!(listing.coordinate().is_some());

        listing.lng = None;
        assert!(listing.coordinate().is_none());
    }

    #[test]
    fn test_sample_store_queries() {
        let store = MemoryStore::sample();
        let all = store.list_all();
        assert!(!all.is_empty());

        let hotels = store.list_by_category(Category::Hotel);
        assert!(hotels.iter().all(|l| l.category == Category::Hotel));

        let first = &all[0];
        assert_eq!(store.get_by_id(first.id).unwrap().id, first.id);
        assert!(store.get_by_id(999_999).is_none());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Pousada do Sol", "category": "inn",
                 "city": "Paraty", "state": "RJ",
                 "lat": -23.2178, "lng": -44.7131}}]"#
        )
        .unwrap();

        let store = MemoryStore::from_json_file(file.path()).unwrap();
        let listing = store.get_by_id(1).unwrap();
        assert_eq!(listing.category, Category::Inn);
        assert!(listing.coordinate().is_some());
    }

    #[test]
    fn test_from_json_file_missing() {
        assert!(MemoryStore::from_json_file(Path::new("/nonexistent.json")).is_err());
    }

    fn sample_listing() -> Listing {
        Listing {
            id: 1,
            name: "Test".into(),
            category: Category::Hotel,
            city: "São Paulo".into(),
            state: "SP".into(),
            description: String::new(),
            stars: None,
            thumb: None,
            reviews: None,
            amenities: vec![],
            lat: Some(-23.56),
            lng: Some(-46.65),
        }
    }
}
