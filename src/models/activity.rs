// src/models/activity.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Entry of the NAF rev. 2 nomenclature (table `nafv2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NafActivity {
    /// Whitespace-stripped code, e.g. `62.01Z`.
    pub codenaf: String,
    pub nafvfinale: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestParams {
    /// Partial label or code typed by the user.
    pub q: Option<String>,
    /// Maximum number of suggestions (default 10, at most 50).
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveParams {
    /// Activity label picked from the suggestions.
    pub activity: Option<String>,
}
