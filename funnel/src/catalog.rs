//! Read-only catalog client.
//!
//! The availability source is a plain HTTP API: countries and cities with
//! showtimes, cinemas by city, and the per-cinema showtimes payload the
//! [`crate::availability::AvailabilityIndex`] is built from. All endpoints
//! are GET; list endpoints are paginated with `page`/`size` query parameters
//! and read until a short page.

use crate::error::FunnelError;
use crate::types::{CinemaId, CityId, CountryId, MovieId};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Catalog call result
pub type CatalogResult<T> = Result<T, FunnelError>;

/// Boxed future returned by [`CatalogApi`] methods
pub type CatalogFuture<T> = Pin<Box<dyn Future<Output = CatalogResult<T>> + Send>>;

// ============================================================================
// Wire types
// ============================================================================

/// A country with at least one future showtime
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Catalog identifier
    pub id: CountryId,
    /// Display name
    pub name: String,
}

/// A city with showtimes, within a country
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Catalog identifier
    pub id: CityId,
    /// Display name
    pub name: String,
    /// Country this city belongs to
    pub country_id: CountryId,
}

/// A cinema physically located in a city
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cinema {
    /// Catalog identifier
    pub id: CinemaId,
    /// Display name
    pub name: String,
    /// City the cinema is located in
    pub city_id: CityId,
}

/// A movie reference with its display title
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRef {
    /// Catalog identifier
    pub id: MovieId,
    /// Display title
    pub title: String,
}

/// Showtimes of one movie within one hall: a list of ISO-8601 timestamps
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieShowtimes {
    /// The movie being shown
    pub movie: MovieRef,
    /// ISO-8601 timestamps, e.g. `"2025-06-01T19:30:00"`
    pub times: Vec<String>,
}

/// One hall of a cinema with its per-movie time lists
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallShowtimes {
    /// Hall name
    pub hall: String,
    /// Movies showing in this hall
    pub movies: Vec<MovieShowtimes>,
}

/// The full per-cinema showtimes payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CinemaShowtimes {
    /// Cinema these showtimes belong to
    pub cinema_id: CinemaId,
    /// Per-hall movie/time lists
    pub halls: Vec<HallShowtimes>,
}

// ============================================================================
// Trait
// ============================================================================

/// Read access to the availability source
///
/// Abstraction over the catalog HTTP API so the selection reducer can be
/// exercised against an in-memory implementation in tests.
pub trait CatalogApi: Send + Sync {
    /// List all countries with at least one future showtime
    fn countries(&self) -> CatalogFuture<Vec<Country>>;

    /// List cities with showtimes in the given country
    fn cities(&self, country: CountryId) -> CatalogFuture<Vec<City>>;

    /// List cinemas located in the given city
    fn cinemas(&self, city: CityId) -> CatalogFuture<Vec<Cinema>>;

    /// Fetch the full showtimes payload for one cinema
    fn cinema_showtimes(&self, cinema: CinemaId) -> CatalogFuture<CinemaShowtimes>;

    /// Look up a cinema's display data by id
    fn cinema_by_id(&self, cinema: CinemaId) -> CatalogFuture<Cinema>;

    /// Look up a movie's display data by id
    fn movie_by_id(&self, movie: MovieId) -> CatalogFuture<MovieRef>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// HTTP catalog client backed by reqwest
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl HttpCatalogClient {
    /// Create a new client against the given base URL
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Network`] when the underlying HTTP client
    /// cannot be built (e.g. TLS backend initialization fails).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        page_size: u32,
    ) -> Result<Self, FunnelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FunnelError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            page_size,
        })
    }

    /// Creates an Arc-wrapped instance for sharing
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::Network`] when the underlying HTTP client
    /// cannot be built.
    pub fn shared(
        base_url: impl Into<String>,
        timeout: Duration,
        page_size: u32,
    ) -> Result<Arc<dyn CatalogApi>, FunnelError> {
        Ok(Arc::new(Self::new(base_url, timeout, page_size)?))
    }

    async fn get_json<T: DeserializeOwned>(client: Client, url: String) -> CatalogResult<T> {
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| FunnelError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| FunnelError::Decode(e.to_string())),
            status => {
                tracing::warn!(%url, status = status.as_u16(), "catalog fetch failed");
                Err(FunnelError::Network(format!(
                    "catalog returned status {status}"
                )))
            }
        }
    }

    /// Read a paginated list endpoint until a short page
    async fn get_paginated<T: DeserializeOwned>(
        client: Client,
        base: String,
        page_size: u32,
    ) -> CatalogResult<Vec<T>> {
        let separator = if base.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!("{base}{separator}page={page}&size={page_size}");
            let batch: Vec<T> = Self::get_json(client.clone(), url).await?;
            let short = (batch.len() as u64) < u64::from(page_size);
            items.extend(batch);
            if short {
                break;
            }
            page += 1;
        }
        Ok(items)
    }
}

impl CatalogApi for HttpCatalogClient {
    fn countries(&self) -> CatalogFuture<Vec<Country>> {
        let client = self.client.clone();
        let url = format!("{}/countries", self.base_url);
        let size = self.page_size;
        Box::pin(Self::get_paginated(client, url, size))
    }

    fn cities(&self, country: CountryId) -> CatalogFuture<Vec<City>> {
        let client = self.client.clone();
        let url = format!("{}/cities?countryId={country}", self.base_url);
        let size = self.page_size;
        Box::pin(Self::get_paginated(client, url, size))
    }

    fn cinemas(&self, city: CityId) -> CatalogFuture<Vec<Cinema>> {
        let client = self.client.clone();
        let url = format!("{}/cinemas?cityId={city}", self.base_url);
        let size = self.page_size;
        Box::pin(Self::get_paginated(client, url, size))
    }

    fn cinema_showtimes(&self, cinema: CinemaId) -> CatalogFuture<CinemaShowtimes> {
        let client = self.client.clone();
        let url = format!("{}/cinemas/{cinema}/showtimes", self.base_url);
        Box::pin(async move {
            tracing::debug!(%cinema, "fetching cinema showtimes");
            Self::get_json(client, url).await
        })
    }

    fn cinema_by_id(&self, cinema: CinemaId) -> CatalogFuture<Cinema> {
        let client = self.client.clone();
        let url = format!("{}/cinemas/{cinema}", self.base_url);
        Box::pin(Self::get_json(client, url))
    }

    fn movie_by_id(&self, movie: MovieId) -> CatalogFuture<MovieRef> {
        let client = self.client.clone();
        let url = format!("{}/movies/{movie}", self.base_url);
        Box::pin(Self::get_json(client, url))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn showtimes_payload_deserializes_from_camel_case() {
        let payload = r#"{
            "cinemaId": 5,
            "halls": [
                {
                    "hall": "Hall 1",
                    "movies": [
                        {
                            "movie": { "id": 9, "title": "Arrival" },
                            "times": ["2025-06-01T19:30:00", "2025-06-01T22:00:00"]
                        }
                    ]
                }
            ]
        }"#;

        let showtimes: CinemaShowtimes = serde_json::from_str(payload).unwrap();
        assert_eq!(showtimes.cinema_id, CinemaId::new(5));
        assert_eq!(showtimes.halls.len(), 1);
        assert_eq!(showtimes.halls[0].movies[0].movie.title, "Arrival");
        assert_eq!(showtimes.halls[0].movies[0].times.len(), 2);
    }
}
