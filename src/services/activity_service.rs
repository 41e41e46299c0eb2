// src/services/activity_service.rs

use sqlx::{Executor, PgConnection, Postgres};

use crate::{common::error::AppError, db::ActivityRepository, models::activity::NafActivity};

pub const DEFAULT_SUGGESTIONS: i64 = 10;
pub const MAX_SUGGESTIONS: i64 = 50;

pub fn suggestion_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_SUGGESTIONS).clamp(1, MAX_SUGGESTIONS)
}

/// Labels shorter than two characters would match most of the nomenclature.
pub fn check_label(label: Option<&str>) -> Result<&str, AppError> {
    match label.map(str::trim) {
        Some(label) if label.chars().count() >= 2 => Ok(label),
        _ => Err(AppError::InvalidParameter(
            "L'activité saisie est trop courte.".to_string(),
        )),
    }
}

#[derive(Clone)]
pub struct ActivityService {
    repo: ActivityRepository,
}

impl ActivityService {
    pub fn new(repo: ActivityRepository) -> Self {
        Self { repo }
    }

    /// Empty input returns an empty list without touching the store.
    pub async fn suggest<'e, E>(
        &self,
        executor: E,
        text: &str,
        limit: i64,
    ) -> Result<Vec<NafActivity>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.suggest(executor, text, limit).await
    }

    /// Exact label first, then the first label containing the input.
    pub async fn resolve_code(
        &self,
        conn: &mut PgConnection,
        label: &str,
    ) -> Result<NafActivity, AppError> {
        if let Some(activity) = self.repo.find_by_label(&mut *conn, label).await? {
            return Ok(activity);
        }

        self.repo
            .find_first_containing(&mut *conn, label)
            .await?
            .ok_or_else(|| AppError::NotFound("Aucun code NAF trouvé pour cette activité.".to_string()))
    }
}
