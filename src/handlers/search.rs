// src/handlers/search.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::{
        db_utils::get_connection,
        error::AppError,
        identifiers::{self, IdentifierKind},
    },
    config::AppState,
    models::company::{Etablissement, SearchParams, SearchRow, SirenParams, SiretParams, UniteLegale},
};

// GET /api/search
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(SearchParams),
    responses(
        (status = 200, description = "Au plus 20 établissements correspondants", body = Vec<SearchRow>),
        (status = 400, description = "Terme de recherche absent ou type inconnu"),
        (status = 500, description = "Erreur serveur")
    )
)]
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchRow>>, AppError> {
    let filters = params.into_filters()?;
    tracing::info!("🔎 Recherche reçue: type={}, query={}", filters.mode, filters.query);

    let mut conn = get_connection(&app_state.db_pool).await?;
    let rows = app_state.search_service.search(&mut *conn, &filters).await?;

    tracing::info!("✅ {} résultat(s) pour '{}'", rows.len(), filters.query);
    Ok(Json(rows))
}

// GET /api/siren
#[utoipa::path(
    get,
    path = "/api/siren",
    tag = "Search",
    params(SirenParams),
    responses(
        (status = 200, description = "Unités légales portant ce Siren", body = Vec<UniteLegale>),
        (status = 400, description = "Siren mal formé"),
        (status = 404, description = "Aucune entreprise")
    )
)]
pub async fn find_by_siren(
    State(app_state): State<AppState>,
    Query(params): Query<SirenParams>,
) -> Result<Json<Vec<UniteLegale>>, AppError> {
    let siren = params.siren.unwrap_or_default();
    let siren = siren.trim();
    identifiers::validate(siren, IdentifierKind::Siren)?;

    let mut conn = get_connection(&app_state.db_pool).await?;
    let units = app_state.search_service.find_by_siren(&mut *conn, siren).await?;

    Ok(Json(units))
}

// GET /api/siret
#[utoipa::path(
    get,
    path = "/api/siret",
    tag = "Search",
    params(SiretParams),
    responses(
        (status = 200, description = "Établissements portant ce Siret", body = Vec<Etablissement>),
        (status = 400, description = "Siret mal formé"),
        (status = 404, description = "Aucun établissement")
    )
)]
pub async fn find_by_siret(
    State(app_state): State<AppState>,
    Query(params): Query<SiretParams>,
) -> Result<Json<Vec<Etablissement>>, AppError> {
    let siret = params.siret.unwrap_or_default();
    let siret = siret.trim();
    identifiers::validate(siret, IdentifierKind::Siret)?;

    let mut conn = get_connection(&app_state.db_pool).await?;
    let establishments = app_state.search_service.find_by_siret(&mut *conn, siret).await?;

    Ok(Json(establishments))
}
