//! Session-lifetime coordinate cache keyed by city name as typed.

use std::collections::HashMap;

use crate::types::CityCoordinates;

/// In-memory map of resolved cities. Entries are never replaced or evicted.
#[derive(Debug, Default)]
pub struct CoordinateCache {
    entries: HashMap<String, CityCoordinates>,
}

impl CoordinateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, city: &str) -> Option<&CityCoordinates> {
        self.entries.get(city)
    }

    /// Insert a freshly resolved city. An existing entry is kept as is.
    pub fn insert(&mut self, city: &str, coordinates: CityCoordinates) -> &CityCoordinates {
        self.entries.entry(city.to_string()).or_insert(coordinates)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
