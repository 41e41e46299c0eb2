// src/services/search_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::company::{Etablissement, SearchFilters, SearchRow, UniteLegale},
};

#[derive(Clone)]
pub struct SearchService {
    repo: CompanyRepository,
}

impl SearchService {
    pub fn new(repo: CompanyRepository) -> Self {
        Self { repo }
    }

    /// Zero rows is a normal outcome, not an error.
    pub async fn search<'e, E>(
        &self,
        executor: E,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.search(executor, filters).await
    }

    /// `siren` must already be a valid SIREN.
    pub async fn find_by_siren<'e, E>(
        &self,
        executor: E,
        siren: &str,
    ) -> Result<Vec<UniteLegale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let units = self.repo.find_legal_units_by_siren(executor, siren).await?;
        if units.is_empty() {
            return Err(AppError::NotFound(format!(
                "Aucune entreprise trouvée avec le Siren {siren}."
            )));
        }
        Ok(units)
    }

    /// `siret` must already be a valid SIRET.
    pub async fn find_by_siret<'e, E>(
        &self,
        executor: E,
        siret: &str,
    ) -> Result<Vec<Etablissement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishments = self.repo.find_establishments_by_siret(executor, siret).await?;
        if establishments.is_empty() {
            return Err(AppError::NotFound(format!(
                "Aucun établissement trouvé avec le Siret {siret}."
            )));
        }
        Ok(establishments)
    }
}
