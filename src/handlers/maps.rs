// src/handlers/maps.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::{db_utils::get_connection, error::AppError},
    config::AppState,
    models::geo::{GeoFilters, GeoHit, MapPin, MapsParams},
    services::geo_service::{radius_area, search_area},
};

// GET /api/maps
#[utoipa::path(
    get,
    path = "/api/maps",
    tag = "Maps",
    params(MapsParams),
    responses(
        (status = 200, description = "Au plus 50 établissements autour du point", body = Vec<MapPin>),
        (status = 400, description = "Coordonnées ou rayon invalides")
    )
)]
pub async fn maps(
    State(app_state): State<AppState>,
    Query(params): Query<MapsParams>,
) -> Result<Json<Vec<MapPin>>, AppError> {
    let bbox = search_area(params.lat, params.lon, params.radius)?;
    tracing::info!(
        "🗺️ Carte: lat={:?}, lon={:?}, rayon={:?}, activité={:?}",
        params.lat,
        params.lon,
        params.radius,
        params.activity
    );

    let mut conn = get_connection(&app_state.db_pool).await?;
    let pins = app_state
        .geo_service
        .find_pins(&mut *conn, &bbox, params.activity.as_deref())
        .await?;

    Ok(Json(pins))
}

// POST /api/companies/search
#[utoipa::path(
    post,
    path = "/api/companies/search",
    tag = "Maps",
    request_body = GeoFilters,
    responses(
        (status = 200, description = "Établissements de l'activité dans le rayon", body = Vec<GeoHit>),
        (status = 400, description = "Filtres invalides")
    )
)]
pub async fn companies_search(
    State(app_state): State<AppState>,
    Json(filters): Json<GeoFilters>,
) -> Result<Json<Vec<GeoHit>>, AppError> {
    let area = radius_area(&filters)?;

    let mut conn = get_connection(&app_state.db_pool).await?;
    let hits = app_state
        .geo_service
        .search_radius(&mut *conn, &area, &filters.activity_code)
        .await?;

    tracing::info!("📍 {} établissement(s) dans {} km", hits.len(), area.radius_km);
    Ok(Json(hits))
}
