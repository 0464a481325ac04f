//! City name to coordinates, cache first.

use crate::cache::CoordinateCache;
use crate::error::WeatherError;
use crate::provider::WeatherProvider;
use crate::types::CityCoordinates;

pub struct CoordinateResolver {
    provider: WeatherProvider,
    cache: CoordinateCache,
}

impl CoordinateResolver {
    pub fn new(provider: WeatherProvider) -> Self {
        Self {
            provider,
            cache: CoordinateCache::new(),
        }
    }

    /// Resolve a city, hitting the network only on a cache miss.
    ///
    /// The cache is written only when the lookup succeeds.
    pub async fn resolve(&mut self, city: &str) -> Result<CityCoordinates, WeatherError> {
        if let Some(cached) = self.cache.get(city) {
            tracing::debug!("Using cached coordinates for {}", city);
            return Ok(cached.clone());
        }

        let coordinates = self.provider.geocode(city).await.map_err(|e| {
            tracing::warn!("Geocoding {} failed: {}", city, e);
            e
        })?;

        tracing::info!(
            "Resolved {} to ({:.4}, {:.4}) {}",
            city,
            coordinates.latitude,
            coordinates.longitude,
            coordinates.timezone
        );
        Ok(self.cache.insert(city, coordinates).clone())
    }

    pub fn cache(&self) -> &CoordinateCache {
        &self.cache
    }
}
