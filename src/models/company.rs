// src/models/company.rs

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::common::error::AppError;

// ---
// Reference records (read-only, owned by the SIRENE store)
// ---

/// Company-level record (table `unitelegale`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UniteLegale {
    pub siren: String,
    pub datecreationunitelegale: Option<NaiveDate>,
    pub trancheeffectifsunitelegale: Option<String>,
    pub anneeffectifsunitelegale: Option<String>,
    pub datederniertraitementunitelegale: Option<NaiveDateTime>,
    pub categorieentreprise: Option<String>,
    pub anneecategorieentreprise: Option<String>,
    pub etatadministratifunitelegale: Option<String>,
    pub nomunitelegale: Option<String>,
    pub nomusageunitelegale: Option<String>,
    pub denominationunitelegale: Option<String>,
    pub categoriejuridiqueunitelegale: Option<String>,
    pub activiteprincipaleunitelegale: Option<String>,
    pub nicsiegeunitelegale: Option<String>,
}

/// Site-level record (table `etablissement`). `siren` is the first nine
/// digits of `siret` and points at the parent [`UniteLegale`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Etablissement {
    pub siret: String,
    pub nic: Option<String>,
    pub siren: String,
    pub datecreationetablissement: Option<NaiveDate>,
    pub trancheeffectifsetablissement: Option<String>,
    pub anneeeffectifsetablissement: Option<String>,
    pub activiteprincipaleetablissement: Option<String>,
    pub datederniertraitementetablissement: Option<NaiveDateTime>,
    pub etatadministratifetablissement: Option<String>,
    pub etablissementsiege: Option<bool>,
    pub enseigne1etablissement: Option<String>,
    pub enseigne2etablissement: Option<String>,
    pub enseigne3etablissement: Option<String>,
    pub denominationusuelleetablissement: Option<String>,
}

/// One joined row of `/api/search`: legal unit, establishment, address and
/// activity label. Establishment columns are absent for units without sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SearchRow {
    pub siren: String,
    pub denominationunitelegale: Option<String>,
    pub siret: Option<String>,
    pub activiteprincipaleetablissement: Option<String>,
    pub libellecommuneetablissement: Option<String>,
    pub activite_nom: Option<String>,
}

// ---
// Search filters
// ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Siren,
    Siret,
    #[default]
    Name,
    Activity,
}

impl SearchMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchMode::Siren => "siren",
            SearchMode::Siret => "siret",
            SearchMode::Name => "name",
            SearchMode::Activity => "activity",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "siren" => Ok(SearchMode::Siren),
            "siret" => Ok(SearchMode::Siret),
            "name" => Ok(SearchMode::Name),
            "activity" => Ok(SearchMode::Activity),
            other => Err(AppError::InvalidParameter(format!(
                "Type de recherche inconnu: '{other}' (siren, siret, name ou activity)."
            ))),
        }
    }
}

/// What the user typed, plus the optional map parameters of the geo form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub query: String,
    #[serde(rename = "type")]
    pub mode: SearchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl SearchFilters {
    pub fn new(mode: SearchMode, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mode,
            ..Self::default()
        }
    }
}

/// Query string of `GET /api/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free text, identifier fragment or NAF code.
    pub query: Option<String>,
    /// `siren`, `siret`, `name` (default) or `activity`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl SearchParams {
    pub fn into_filters(self) -> Result<SearchFilters, AppError> {
        let query = self.query.unwrap_or_default();
        if query.trim().is_empty() {
            return Err(AppError::MissingQuery);
        }

        let mode = match self.kind.as_deref() {
            Some(kind) if !kind.trim().is_empty() => kind.parse()?,
            _ => SearchMode::default(),
        };

        Ok(SearchFilters::new(mode, query))
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SirenParams {
    pub siren: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SiretParams {
    pub siret: Option<String>,
}
