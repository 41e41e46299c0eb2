// In-memory backend for the client tests.

use std::{collections::HashMap, sync::Mutex, time::Duration};

use async_trait::async_trait;

use crate::{
    client::{
        api::SirenApi,
        error::ClientError,
        geocode::{Geocoder, Place},
    },
    models::{
        activity::NafActivity,
        company::{Etablissement, SearchFilters, SearchRow, UniteLegale},
        geo::{GeoFilters, GeoHit},
    },
};

#[derive(Default)]
pub(crate) struct FakeApi {
    pub rows: Vec<SearchRow>,
    pub legal_units: HashMap<String, UniteLegale>,
    pub establishments: Vec<Etablissement>,
    pub activities: Vec<NafActivity>,
    pub hits: Vec<GeoHit>,
    pub fail_parents: bool,
    /// Simulated latency of `suggest_activities`, logged as "answered ...".
    pub suggest_latency: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SirenApi for FakeApi {
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<SearchRow>, ClientError> {
        self.record(format!("search {} {}", filters.mode, filters.query));
        Ok(self.rows.clone())
    }

    async fn search_companies(&self, filters: &GeoFilters) -> Result<Vec<GeoHit>, ClientError> {
        self.record(format!("companies {}", filters.activity_code));
        Ok(self.hits.clone())
    }

    async fn establishment_by_siret(
        &self,
        siret: &str,
    ) -> Result<Option<Etablissement>, ClientError> {
        self.record(format!("siret {siret}"));
        Ok(self.establishments.iter().find(|e| e.siret == siret).cloned())
    }

    async fn fetch_legal_units(
        &self,
        sirens: &[String],
    ) -> Result<HashMap<String, UniteLegale>, ClientError> {
        self.record(format!("parents {}", sirens.join(",")));
        if self.fail_parents {
            return Err(ClientError::Http { status: reqwest::StatusCode::BAD_GATEWAY });
        }
        Ok(sirens
            .iter()
            .filter_map(|s| self.legal_units.get(s).map(|u| (s.clone(), u.clone())))
            .collect())
    }

    async fn suggest_activities(&self, text: &str) -> Result<Vec<NafActivity>, ClientError> {
        self.record(format!("suggest {text}"));
        if let Some(latency) = self.suggest_latency {
            tokio::time::sleep(latency).await;
            self.record(format!("answered {text}"));
        }
        Ok(self
            .activities
            .iter()
            .filter(|a| {
                a.nafvfinale
                    .as_deref()
                    .is_some_and(|label| label.to_lowercase().contains(&text.to_lowercase()))
            })
            .cloned()
            .collect())
    }

    async fn resolve_activity_code(
        &self,
        label: &str,
    ) -> Result<Option<NafActivity>, ClientError> {
        self.record(format!("get-naf {label}"));
        Ok(self
            .activities
            .iter()
            .find(|a| a.nafvfinale.as_deref() == Some(label))
            .cloned())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        self.record(format!("login {email}"));
        if password.is_empty() {
            return Err(ClientError::Rejected("E-mail ou mot de passe invalide.".to_string()));
        }
        Ok(format!("jeton-{email}"))
    }

    async fn register(
        &self,
        username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<String, ClientError> {
        self.record(format!("register {username}"));
        Ok("Inscription réussie !".to_string())
    }
}

#[derive(Default)]
pub(crate) struct FakeGeocoder {
    pub places: HashMap<String, Place>,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Place>, ClientError> {
        Ok(self.places.get(address).cloned())
    }
}
