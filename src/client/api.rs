// src/client/api.rs

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    client::error::ClientError,
    models::{
        activity::NafActivity,
        auth::AuthResponse,
        company::{Etablissement, SearchFilters, SearchRow, UniteLegale},
        geo::{GeoFilters, GeoHit},
    },
};

/// Everything the flows need from the backend.
#[async_trait]
pub trait SirenApi: Send + Sync {
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<SearchRow>, ClientError>;

    async fn search_companies(&self, filters: &GeoFilters) -> Result<Vec<GeoHit>, ClientError>;

    async fn establishment_by_siret(&self, siret: &str)
        -> Result<Option<Etablissement>, ClientError>;

    /// Parent companies keyed by siren. Unknown sirens, and sirens whose
    /// lookup failed, are missing from the map.
    async fn fetch_legal_units(
        &self,
        sirens: &[String],
    ) -> Result<HashMap<String, UniteLegale>, ClientError>;

    async fn suggest_activities(&self, text: &str) -> Result<Vec<NafActivity>, ClientError>;

    async fn resolve_activity_code(&self, label: &str)
        -> Result<Option<NafActivity>, ClientError>;

    /// Returns the bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError>;

    /// Returns the confirmation message.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError>;
}

#[derive(Clone)]
pub struct HttpSirenApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSirenApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        decode(response).await
    }

    /// Like `get_json`, but a 404 means "nothing there".
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, ClientError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    async fn post_auth(&self, path: &str, body: serde_json::Value) -> Result<AuthResponse, ClientError> {
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        let status = response.status();
        let body: AuthResponse = response.json().await?;

        if body.success {
            Ok(body)
        } else {
            Err(ClientError::Rejected(
                body.message.unwrap_or_else(|| format!("HTTP {status}")),
            ))
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("⚠️ {} a répondu {}", response.url(), status);
        return Err(ClientError::Http { status });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl SirenApi for HttpSirenApi {
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<SearchRow>, ClientError> {
        tracing::debug!("GET /api/search type={} query={}", filters.mode, filters.query);
        self.get_json(
            "/api/search",
            &[("query", filters.query.as_str()), ("type", filters.mode.as_str())],
        )
        .await
    }

    async fn search_companies(&self, filters: &GeoFilters) -> Result<Vec<GeoHit>, ClientError> {
        let response = self
            .client
            .post(self.url("/api/companies/search"))
            .json(filters)
            .send()
            .await?;
        decode(response).await
    }

    async fn establishment_by_siret(
        &self,
        siret: &str,
    ) -> Result<Option<Etablissement>, ClientError> {
        let establishments: Option<Vec<Etablissement>> =
            self.get_optional("/api/siret", &[("siret", siret)]).await?;
        Ok(establishments.and_then(|list| list.into_iter().next()))
    }

    // One request per distinct siren.
    async fn fetch_legal_units(
        &self,
        sirens: &[String],
    ) -> Result<HashMap<String, UniteLegale>, ClientError> {
        let distinct: BTreeSet<&str> = sirens.iter().map(String::as_str).collect();
        let mut units = HashMap::with_capacity(distinct.len());

        for siren in distinct {
            // one failing parent must not cost the others their enrichment
            let found: Result<Option<Vec<UniteLegale>>, ClientError> =
                self.get_optional("/api/siren", &[("siren", siren)]).await;
            match found {
                Ok(found) => {
                    if let Some(unit) = found.and_then(|list| list.into_iter().next()) {
                        units.insert(siren.to_string(), unit);
                    }
                }
                Err(e) => tracing::warn!("⚠️ Unité légale {} indisponible: {}", siren, e),
            }
        }

        Ok(units)
    }

    async fn suggest_activities(&self, text: &str) -> Result<Vec<NafActivity>, ClientError> {
        self.get_json("/activities/suggest", &[("q", text)]).await
    }

    async fn resolve_activity_code(
        &self,
        label: &str,
    ) -> Result<Option<NafActivity>, ClientError> {
        self.get_optional("/activities/get-naf", &[("activity", label)]).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body = self
            .post_auth("/auth/login", json!({ "email": email, "password": password }))
            .await?;
        body.token
            .ok_or_else(|| ClientError::Rejected("Aucun jeton reçu.".to_string()))
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let body = self
            .post_auth(
                "/auth/register",
                json!({ "username": username, "email": email, "password": password }),
            )
            .await?;
        Ok(body.message.unwrap_or_default())
    }
}
