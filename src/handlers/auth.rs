// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::{Validate, ValidationErrors};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, User},
};

type AuthResult = Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<AuthResponse>)>;

// Account endpoints answer {success: false, message} instead of {error}
fn failure(err: AppError) -> (StatusCode, Json<AuthResponse>) {
    let (status, message) = match &err {
        AppError::ValidationError(errors) => {
            (StatusCode::BAD_REQUEST, first_message(errors).unwrap_or_else(|| err.to_string()))
        }
        _ => err.status_and_message(),
    };
    (status, Json(AuthResponse::message(false, message)))
}

fn first_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
}

// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Compte créé", body = AuthResponse),
        (status = 400, description = "Champs invalides", body = AuthResponse),
        (status = 409, description = "Compte déjà existant", body = AuthResponse)
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> AuthResult {
    payload.validate().map_err(|e| failure(AppError::ValidationError(e)))?;

    app_state
        .auth_service
        .register_user(payload.username.trim(), payload.email.trim(), &payload.password)
        .await
        .map_err(failure)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::message(true, "Inscription réussie !")),
    ))
}

// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Jeton JWT", body = AuthResponse),
        (status = 401, description = "Identifiants invalides", body = AuthResponse)
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> AuthResult {
    payload.validate().map_err(|e| failure(AppError::ValidationError(e)))?;

    let token = app_state
        .auth_service
        .login_user(payload.email.trim(), &payload.password)
        .await
        .map_err(failure)?;

    Ok((StatusCode::OK, Json(AuthResponse::token(token))))
}

// GET /auth/me
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Compte associé au jeton", body = User),
        (status = 401, description = "Jeton absent ou invalide")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
