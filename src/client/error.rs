// src/client/error.rs

use reqwest::StatusCode;
use thiserror::Error;

use crate::common::identifiers::IdentifierError;

/// Shown for every transport or server failure, whatever the status code.
pub const SEARCH_FAILED_MESSAGE: &str = "La recherche a échoué, veuillez réessayer.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Invalid(#[from] IdentifierError),

    #[error("{0}")]
    NotFound(String),

    /// The server refused the request with a message meant for the user.
    #[error("{0}")]
    Rejected(String),

    #[error("réponse HTTP inattendue: {status}")]
    Http { status: StatusCode },

    #[error("erreur de transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("stockage de session indisponible: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Veuillez vous connecter pour accéder à cette page.")]
    Unauthenticated,
}

impl ClientError {
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http { .. } | ClientError::Transport(_) => {
                tracing::error!("❌ {}", self);
                SEARCH_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}
