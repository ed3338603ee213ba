//! Address → coordinate lookup.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::event::GeoCoordinate;

/// Resolves free-text addresses into coordinates.
///
/// `None` means the address could not be placed, for whatever reason.
/// Implementations never fail the caller and keep no state between calls.
pub trait Geocoder {
    fn resolve(&self, address: &str) -> impl Future<Output = Option<GeoCoordinate>> + Send;
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
#[derive(Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: String,
}

/// One element of the `/search?format=json` response
#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        NominatimGeocoder {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, config.geocoder_base_url.clone())
    }

    async fn lookup(&self, address: &str) -> Result<Vec<SearchHit>, reqwest::Error> {
        self.http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, address: &str) -> Option<GeoCoordinate> {
        let hits = match self.lookup(address).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(address, error = %e, "geocoding request failed");
                return None;
            }
        };

        let Some(hit) = hits.into_iter().next() else {
            debug!(address, "geocoder returned no results");
            return None;
        };

        let coordinate = match (hit.lat.trim().parse::<f64>(), hit.lon.trim().parse::<f64>()) {
            (Ok(lat), Ok(lon)) => GeoCoordinate::new(lat, lon),
            _ => None,
        };

        match coordinate {
            Some(c) => {
                debug!(address, coordinate = %c, "address resolved");
                Some(c)
            }
            None => {
                warn!(address, lat = %hit.lat, lon = %hit.lon, "geocoder returned an unusable coordinate");
                None
            }
        }
    }
}
