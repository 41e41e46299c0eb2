// src/handlers/activities.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::{db_utils::get_connection, error::AppError},
    config::AppState,
    models::activity::{NafActivity, ResolveParams, SuggestParams},
    services::activity_service::{check_label, suggestion_limit},
};

// GET /activities/suggest
#[utoipa::path(
    get,
    path = "/activities/suggest",
    tag = "Activities",
    params(SuggestParams),
    responses(
        (status = 200, description = "Activités dont le libellé ou le code contient la saisie", body = Vec<NafActivity>)
    )
)]
pub async fn suggest(
    State(app_state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<Vec<NafActivity>>, AppError> {
    let text = params.q.unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let limit = suggestion_limit(params.limit);
    let mut conn = get_connection(&app_state.db_pool).await?;
    let activities = app_state
        .activity_service
        .suggest(&mut *conn, &text, limit)
        .await?;

    tracing::debug!("{} suggestion(s) pour '{}'", activities.len(), text.trim());
    Ok(Json(activities))
}

// GET /activities/get-naf
#[utoipa::path(
    get,
    path = "/activities/get-naf",
    tag = "Activities",
    params(ResolveParams),
    responses(
        (status = 200, description = "Code NAF de l'activité", body = NafActivity),
        (status = 400, description = "Activité trop courte"),
        (status = 404, description = "Aucun code NAF trouvé pour cette activité.")
    )
)]
pub async fn get_naf(
    State(app_state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<NafActivity>, AppError> {
    let label = check_label(params.activity.as_deref())?;

    let mut conn = get_connection(&app_state.db_pool).await?;
    let activity = app_state.activity_service.resolve_code(&mut *conn, label).await?;

    tracing::info!("🏷️ Activité '{}' résolue en {}", label, activity.codenaf);
    Ok(Json(activity))
}
