// src/db/company_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::search_query,
    models::company::{Etablissement, SearchFilters, SearchRow, UniteLegale},
};

const UNITE_LEGALE_COLUMNS: &str = r#"
    siren, datecreationunitelegale, trancheeffectifsunitelegale,
    anneeffectifsunitelegale, datederniertraitementunitelegale,
    categorieentreprise, anneecategorieentreprise, etatadministratifunitelegale,
    nomunitelegale, nomusageunitelegale, denominationunitelegale,
    categoriejuridiqueunitelegale, activiteprincipaleunitelegale, nicsiegeunitelegale
"#;

const ETABLISSEMENT_COLUMNS: &str = r#"
    siret, nic, siren, datecreationetablissement, trancheeffectifsetablissement,
    anneeeffectifsetablissement, activiteprincipaleetablissement,
    datederniertraitementetablissement, etatadministratifetablissement,
    etablissementsiege, enseigne1etablissement, enseigne2etablissement,
    enseigne3etablissement, denominationusuelleetablissement
"#;

/// Read-only access to `unitelegale`, `etablissement` and their joins.
#[derive(Clone, Copy, Default)]
pub struct CompanyRepository;

impl CompanyRepository {
    /// Runs the joined search for any mode (at most 20 rows, store order).
    pub async fn search<'e, E>(
        &self,
        executor: E,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let statement = search_query::build(filters)?;
        tracing::debug!(sql = %statement.sql, values = ?statement.values, "🔎 Requête de recherche");

        Ok(statement.fetch_all(executor).await?)
    }

    pub async fn find_legal_units_by_siren<'e, E>(
        &self,
        executor: E,
        siren: &str,
    ) -> Result<Vec<UniteLegale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let units = sqlx::query_as::<_, UniteLegale>(&format!(
            "SELECT {UNITE_LEGALE_COLUMNS} FROM unitelegale WHERE siren = $1"
        ))
        .bind(siren)
        .fetch_all(executor)
        .await?;

        Ok(units)
    }

    pub async fn find_establishments_by_siret<'e, E>(
        &self,
        executor: E,
        siret: &str,
    ) -> Result<Vec<Etablissement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishments = sqlx::query_as::<_, Etablissement>(&format!(
            "SELECT {ETABLISSEMENT_COLUMNS} FROM etablissement WHERE siret = $1"
        ))
        .bind(siret)
        .fetch_all(executor)
        .await?;

        Ok(establishments)
    }
}
