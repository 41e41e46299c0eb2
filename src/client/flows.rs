// src/client/flows.rs

use std::collections::BTreeSet;

use crate::{
    client::{
        api::SirenApi,
        error::ClientError,
        geocode::{Geocoder, Place},
        reconcile::{reconcile, DisplayEntity, Entity},
        view::results_summary,
    },
    common::identifiers::{self, IdentifierKind},
    models::{
        activity::NafActivity,
        company::SearchFilters,
        geo::{GeoFilters, GeoHit, DEFAULT_RADIUS_KM},
    },
};

pub const NO_ACTIVITY_CODE_MESSAGE: &str = "Aucun code NAF trouvé pour cette activité.";
pub const ADDRESS_NOT_FOUND_MESSAGE: &str = "Adresse introuvable.";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub entities: Vec<DisplayEntity>,
    pub summary: String,
}

/// Validates the form, runs one search and attaches each row's parent company.
/// A failed parent lookup only degrades the cards, it never fails the search.
pub async fn run_search(
    api: &dyn SirenApi,
    filters: &SearchFilters,
) -> Result<SearchOutcome, ClientError> {
    identifiers::validate_filters(filters)?;

    let rows = api.search(filters).await?;
    if rows.is_empty() {
        return Ok(SearchOutcome { entities: Vec::new(), summary: results_summary(0) });
    }

    let entities: Vec<Entity> = rows.into_iter().map(Entity::SearchResult).collect();
    let sirens: Vec<String> = entities
        .iter()
        .filter_map(Entity::parent_siren)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let parents = match api.fetch_legal_units(&sirens).await {
        Ok(parents) => parents,
        Err(e) => {
            tracing::warn!("⚠️ Unités légales indisponibles: {}", e);
            Default::default()
        }
    };

    let entities: Vec<DisplayEntity> = entities
        .iter()
        .map(|entity| reconcile(entity, entity.parent_siren().and_then(|s| parents.get(s))))
        .collect();

    Ok(SearchOutcome { summary: results_summary(entities.len()), entities })
}

/// Card of a single establishment, with its parent company when available.
pub async fn lookup_siret(api: &dyn SirenApi, siret: &str) -> Result<DisplayEntity, ClientError> {
    let siret = siret.trim();
    identifiers::validate(siret, IdentifierKind::Siret)?;

    let establishment = api
        .establishment_by_siret(siret)
        .await?
        .ok_or_else(|| ClientError::NotFound("Aucun établissement trouvé avec ce Siret.".to_string()))?;

    let entity = Entity::Establishment(establishment);
    let parent = match entity.parent_siren() {
        Some(siren) => api
            .fetch_legal_units(&[siren.to_string()])
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ Unité légale {} indisponible: {}", siren, e);
                Default::default()
            })
            .remove(siren),
        None => None,
    };

    Ok(reconcile(&entity, parent.as_ref()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOutcome {
    pub activity: NafActivity,
    pub place: Place,
    pub hits: Vec<GeoHit>,
}

/// Activity label and address to pins. Stops before any company search when
/// the label has no NAF code or the address cannot be placed.
pub async fn run_map_search(
    api: &dyn SirenApi,
    geocoder: &dyn Geocoder,
    activity_label: &str,
    address: &str,
    radius_km: Option<f64>,
) -> Result<MapOutcome, ClientError> {
    let activity = api
        .resolve_activity_code(activity_label.trim())
        .await?
        .ok_or_else(|| ClientError::NotFound(NO_ACTIVITY_CODE_MESSAGE.to_string()))?;

    let place = geocoder
        .geocode(address.trim())
        .await?
        .ok_or_else(|| ClientError::NotFound(ADDRESS_NOT_FOUND_MESSAGE.to_string()))?;

    let filters = GeoFilters {
        activity_code: activity.codenaf.clone(),
        latitude: place.latitude,
        longitude: place.longitude,
        radius: radius_km.unwrap_or(DEFAULT_RADIUS_KM),
    };
    let hits = api.search_companies(&filters).await?;
    tracing::info!("📍 {} établissement(s) autour de {}", hits.len(), place.label);

    Ok(MapOutcome { activity, place, hits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        reconcile::NO_NAME,
        testing::{FakeApi, FakeGeocoder},
    };
    use crate::models::company::{Etablissement, SearchMode, SearchRow, UniteLegale};

    fn row(siren: &str, siret: &str) -> SearchRow {
        SearchRow {
            siren: siren.to_string(),
            siret: Some(siret.to_string()),
            ..SearchRow::default()
        }
    }

    fn acme(siren: &str) -> UniteLegale {
        UniteLegale {
            siren: siren.to_string(),
            denominationunitelegale: Some("ACME".to_string()),
            ..UniteLegale::default()
        }
    }

    #[tokio::test]
    async fn invalid_siren_never_reaches_the_api() {
        let api = FakeApi::default();
        let err = run_search(&api, &SearchFilters::new(SearchMode::Siren, "7328"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Le Siren doit contenir 9 chiffres.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn zero_rows_skip_parent_lookups() {
        let api = FakeApi::default();
        let outcome = run_search(&api, &SearchFilters::new(SearchMode::Siren, "732829320"))
            .await
            .unwrap();

        assert_eq!(outcome.summary, "0 entreprises trouvées");
        assert!(outcome.entities.is_empty());
        assert_eq!(api.calls(), vec!["search siren 732829320"]);
    }

    #[tokio::test]
    async fn parents_are_fetched_in_one_batch() {
        let api = FakeApi {
            rows: vec![
                row("732829320", "73282932000074"),
                row("732829320", "73282932000082"),
                row("552100554", "55210055400013"),
            ],
            legal_units: [("732829320".to_string(), acme("732829320"))].into(),
            ..FakeApi::default()
        };

        let outcome = run_search(&api, &SearchFilters::new(SearchMode::Name, "acme"))
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec!["search name acme", "parents 552100554,732829320"]
        );
        assert_eq!(outcome.summary, "3 entreprises trouvées");
        assert_eq!(outcome.entities[0].name, "ACME");
        assert_eq!(outcome.entities[2].name, NO_NAME);
    }

    #[tokio::test]
    async fn failed_parent_lookup_keeps_the_results() {
        let api = FakeApi {
            rows: vec![row("732829320", "73282932000074")],
            fail_parents: true,
            ..FakeApi::default()
        };

        let outcome = run_search(&api, &SearchFilters::new(SearchMode::Name, "acme"))
            .await
            .unwrap();
        assert_eq!(outcome.summary, "1 entreprise trouvée");
        assert_eq!(outcome.entities[0].name, NO_NAME);
    }

    #[tokio::test]
    async fn siret_lookup_merges_the_parent() {
        let api = FakeApi {
            establishments: vec![Etablissement {
                siret: "73282932000074".to_string(),
                siren: "732829320".to_string(),
                denominationusuelleetablissement: Some(String::new()),
                ..Etablissement::default()
            }],
            legal_units: [("732829320".to_string(), acme("732829320"))].into(),
            ..FakeApi::default()
        };

        let card = lookup_siret(&api, "73282932000074").await.unwrap();
        assert_eq!(card.name, "ACME");

        let err = lookup_siret(&api, "73282932000000").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    fn naf() -> NafActivity {
        NafActivity {
            codenaf: "62.01Z".to_string(),
            nafvfinale: Some("Programmation informatique".to_string()),
        }
    }

    fn paris() -> FakeGeocoder {
        FakeGeocoder {
            places: [(
                "Paris".to_string(),
                Place { latitude: 48.8566, longitude: 2.3522, label: "Paris".to_string() },
            )]
            .into(),
        }
    }

    #[tokio::test]
    async fn unknown_activity_stops_the_map_search() {
        let api = FakeApi::default();
        let err = run_map_search(&api, &paris(), "Astronautique", "Paris", None)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), NO_ACTIVITY_CODE_MESSAGE);
        assert_eq!(api.calls(), vec!["get-naf Astronautique"]);
    }

    #[tokio::test]
    async fn unknown_address_stops_the_map_search() {
        let api = FakeApi { activities: vec![naf()], ..FakeApi::default() };
        let err = run_map_search(&api, &paris(), "Programmation informatique", "Atlantide", None)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), ADDRESS_NOT_FOUND_MESSAGE);
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn map_search_uses_the_resolved_code() {
        let api = FakeApi {
            activities: vec![naf()],
            hits: vec![GeoHit { siret: "73282932000074".to_string(), x: 2.36, y: 48.86 }],
            ..FakeApi::default()
        };

        let outcome = run_map_search(&api, &paris(), "Programmation informatique", "Paris", Some(2.0))
            .await
            .unwrap();

        assert_eq!(outcome.activity.codenaf, "62.01Z");
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(api.calls().last().map(String::as_str), Some("companies 62.01Z"));
    }
}
