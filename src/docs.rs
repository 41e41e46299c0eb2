// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Search ---
        handlers::search::search,
        handlers::search::find_by_siren,
        handlers::search::find_by_siret,

        // --- Activities ---
        handlers::activities::suggest,
        handlers::activities::get_naf,

        // --- Maps ---
        handlers::maps::maps,
        handlers::maps::companies_search,

        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,
    ),
    components(
        schemas(
            models::company::UniteLegale,
            models::company::Etablissement,
            models::company::SearchRow,
            models::company::SearchMode,
            models::company::SearchFilters,

            models::activity::NafActivity,

            models::geo::MapPin,
            models::geo::GeoFilters,
            models::geo::GeoHit,

            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
        )
    ),
    tags(
        (name = "Search", description = "Recherche d'entreprises et d'établissements"),
        (name = "Activities", description = "Nomenclature NAF"),
        (name = "Maps", description = "Recherche géographique"),
        (name = "Auth", description = "Comptes et authentification")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/search",
            "/api/siren",
            "/api/siret",
            "/api/maps",
            "/api/companies/search",
            "/activities/suggest",
            "/activities/get-naf",
            "/auth/register",
            "/auth/login",
            "/auth/me",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} manquant");
        }
    }
}
