// src/client/geocode.rs

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::error::ClientError;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("siren-search/", env!("CARGO_PKG_VERSION"));
const CANDIDATES: &str = "5";

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Free-text address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<Place>, ClientError>;
}

// Nominatim sends coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimPlace {
    fn into_place(self) -> Option<Place> {
        Some(Place {
            latitude: self.lat.parse().ok()?,
            longitude: self.lon.parse().ok()?,
            label: self.display_name,
        })
    }
}

pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, ClientError> {
        Self::with_endpoint(NOMINATIM_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        // Nominatim refuses anonymous clients
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    /// First of at most five candidates.
    async fn geocode(&self, address: &str) -> Result<Option<Place>, ClientError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", address), ("format", "json"), ("limit", CANDIDATES)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http { status });
        }

        let candidates: Vec<NominatimPlace> = response.json().await?;
        let place = candidates.into_iter().next().and_then(NominatimPlace::into_place);
        if place.is_none() {
            tracing::info!("Aucune coordonnée pour '{}'", address);
        }
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn geocoder(router: Router) -> NominatimGeocoder {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        NominatimGeocoder::with_endpoint(format!("http://{addr}/search")).unwrap()
    }

    #[tokio::test]
    async fn first_candidate_wins() {
        let router = Router::new().route(
            "/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["limit"], "5");
                Json(json!([
                    { "lat": "48.8566", "lon": "2.3522", "display_name": "Paris" },
                    { "lat": "45.75", "lon": "4.85", "display_name": "Lyon" }
                ]))
            }),
        );

        let place = geocoder(router).await.geocode("Paris").await.unwrap().unwrap();
        assert_eq!(place.label, "Paris");
        assert_eq!(place.latitude, 48.8566);
        assert_eq!(place.longitude, 2.3522);
    }

    #[tokio::test]
    async fn no_candidate_is_none() {
        let router = Router::new().route("/search", get(|| async { Json(Value::Array(vec![])) }));
        assert_eq!(geocoder(router).await.geocode("nulle part").await.unwrap(), None);
    }
}
