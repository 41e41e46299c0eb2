//! Format checks for SIREN (9 digits) and SIRET (14 digits) inputs.
//!
//! The checks run before any request is sent or any statement is built, so a
//! rejected input never reaches the store.

use std::fmt;

use thiserror::Error;

use crate::models::company::{SearchFilters, SearchMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Siren,
    Siret,
}

impl IdentifierKind {
    pub const fn digit_count(self) -> usize {
        match self {
            IdentifierKind::Siren => 9,
            IdentifierKind::Siret => 14,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Siren => f.write_str("Siren"),
            IdentifierKind::Siret => f.write_str("Siret"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Veuillez entrer une valeur dans le champ de recherche.")]
    Empty,

    #[error("Le {kind} doit contenir {} chiffres.", .kind.digit_count())]
    WrongLength { kind: IdentifierKind },

    #[error("Le {kind} doit contenir uniquement des chiffres.")]
    NotDigits { kind: IdentifierKind },
}

/// Length is checked before content, so `"12A"` reports the length.
pub fn validate(candidate: &str, kind: IdentifierKind) -> Result<(), IdentifierError> {
    if candidate.trim().is_empty() {
        return Err(IdentifierError::Empty);
    }
    if candidate.chars().count() != kind.digit_count() {
        return Err(IdentifierError::WrongLength { kind });
    }
    if !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdentifierError::NotDigits { kind });
    }
    Ok(())
}

/// Gate applied to a search form before it is submitted.
pub fn validate_filters(filters: &SearchFilters) -> Result<(), IdentifierError> {
    match filters.mode {
        SearchMode::Siren => validate(&filters.query, IdentifierKind::Siren),
        SearchMode::Siret => validate(&filters.query, IdentifierKind::Siret),
        SearchMode::Name | SearchMode::Activity if filters.query.trim().is_empty() => {
            Err(IdentifierError::Empty)
        }
        SearchMode::Name | SearchMode::Activity => Ok(()),
    }
}
