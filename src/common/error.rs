use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::identifiers::IdentifierError;

/// Message returned for every failure the caller cannot fix.
pub const SERVER_ERROR_MESSAGE: &str = "Erreur serveur";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Veuillez entrer un terme de recherche.")]
    MissingQuery,

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Un compte existe déjà avec cet e-mail ou ce nom d'utilisateur.")]
    AccountAlreadyExists,

    #[error("E-mail ou mot de passe invalide.")]
    InvalidCredentials,

    #[error("Jeton d'authentification invalide ou absent.")]
    InvalidToken,

    #[error("Erreur de base de données: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erreur interne: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erreur bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erreur JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Status and client-facing message. Server-side failures are logged here
    /// and collapsed into [`SERVER_ERROR_MESSAGE`].
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingQuery
            | AppError::InvalidIdentifier(_)
            | AppError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::AccountAlreadyExists => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidCredentials | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            e => {
                tracing::error!("❌ Erreur interne du serveur: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Un ou plusieurs champs sont invalides.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = self.status_and_message();
        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
