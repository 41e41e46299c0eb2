// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Account row (table `admin_users`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,

    #[serde(skip_serializing)]
    pub hashed_password: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 3, max = 50, message = "Le nom d'utilisateur doit contenir entre 3 et 50 caractères."))]
    pub username: String,
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: String,
    #[validate(length(min = 1, message = "Le mot de passe est obligatoire."))]
    pub password: String,
}

/// Body of both auth endpoints: `{success, token}` on login,
/// `{success, message}` on registration and on every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn token(token: String) -> Self {
        Self { success: true, token: Some(token), message: None }
    }

    pub fn message(success: bool, message: impl Into<String>) -> Self {
        Self { success, token: None, message: Some(message.into()) }
    }
}

// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,   // user id
    pub exp: usize, // expiration
    pub iat: usize, // issued at
}
