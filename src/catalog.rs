use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::LatLng;

/// A bookable destination, or the fare-zero home airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub coordinates: LatLng,
    /// One-way fare from the origin. Zero marks the origin itself.
    pub price: f64,
}

impl Location {
    pub fn is_origin(&self) -> bool {
        self.price == 0.0
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate location code: {0}")]
    DuplicateCode(String),
    #[error("location {0} has a negative price")]
    NegativePrice(String),
    #[error("catalog has no origin (a location with price 0)")]
    MissingOrigin,
}

/// The fare catalog: code-keyed locations, loaded once at startup and never
/// mutated. Insertion order is kept for display only.
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    pub fn new(locations: Vec<Location>) -> Result<Self, CatalogError> {
        for (i, location) in locations.iter().enumerate() {
            if location.price < 0.0 {
                return Err(CatalogError::NegativePrice(location.code.clone()));
            }
            if locations[..i].iter().any(|l| l.code == location.code) {
                return Err(CatalogError::DuplicateCode(location.code.clone()));
            }
        }
        if !locations.iter().any(Location::is_origin) {
            return Err(CatalogError::MissingOrigin);
        }
        Ok(Self { locations })
    }

    pub fn get(&self, code: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.code == code)
    }

    /// The base location every route departs from (first fare-zero entry).
    pub fn origin(&self) -> &Location {
        self.locations
            .iter()
            .find(|l| l.is_origin())
            .expect("catalog validated at construction")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Everything selectable as a destination, in catalog order.
    pub fn destinations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| !l.is_origin())
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for Catalog {
    /// The built-in catalog: fares out of Melbourne.
    fn default() -> Self {
        fn loc(code: &str, name: &str, lat: f64, lon: f64, price: f64) -> Location {
            Location {
                code: code.into(),
                name: name.into(),
                coordinates: LatLng::new(lat, lon),
                price,
            }
        }

        Self::new(vec![
            loc("MEL", "Melbourne", -37.8136, 144.9631, 0.0),
            loc("SYD", "Sydney", -33.8688, 151.2093, 129.0),
            loc("CBR", "Canberra", -35.2809, 149.1300, 99.0),
            loc("ADL", "Adelaide", -34.9285, 138.6007, 109.0),
            loc("HBA", "Hobart", -42.8821, 147.3272, 119.0),
            loc("OOL", "Gold Coast", -28.0167, 153.4000, 149.0),
            loc("BNE", "Brisbane", -27.4698, 153.0251, 155.0),
            loc("CNS", "Cairns", -16.9186, 145.7781, 259.0),
            loc("PER", "Perth", -31.9505, 115.8605, 289.0),
            loc("DRW", "Darwin", -12.4634, 130.8456, 339.0),
        ])
        .expect("built-in catalog is valid")
    }
}
