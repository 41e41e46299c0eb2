// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/search", get(handlers::search::search))
        .route("/siren", get(handlers::search::find_by_siren))
        .route("/siret", get(handlers::search::find_by_siret))
        .route("/maps", get(handlers::maps::maps))
        .route("/companies/search", post(handlers::maps::companies_search));

    let activity_routes = Router::new()
        .route("/suggest", get(handlers::activities::suggest))
        .route("/get-naf", get(handlers::activities::get_naf));

    // Public account routes
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let account_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", api_routes)
        .nest("/activities", activity_routes)
        .nest("/auth", auth_routes.merge(account_routes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
