// src/db/activity_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{
        geo_query::normalize_code,
        statement::{contains_pattern, exact_pattern},
    },
    models::activity::NafActivity,
};

// Codes are stored as "62.01 Z" in places: both sides are compared without
// whitespace, so the suggestion matches what the caller gets back.
const SUGGEST_SQL: &str = r#"
    SELECT REPLACE(codenaf, ' ', '') AS codenaf, nafvfinale
    FROM nafv2
    WHERE nafvfinale ILIKE $1 OR REPLACE(codenaf, ' ', '') ILIKE $2
    LIMIT $3
"#;

/// ($1, $2) of [`SUGGEST_SQL`]: the label pattern and the whitespace-free
/// code pattern.
fn suggest_patterns(text: &str) -> (String, String) {
    (contains_pattern(text), contains_pattern(&normalize_code(text)))
}

/// Read-only access to the NAF nomenclature (`nafv2`).
#[derive(Clone, Copy, Default)]
pub struct ActivityRepository;

impl ActivityRepository {
    /// Labels or codes containing `text`, case-insensitive. Codes match on
    /// their normalized form.
    pub async fn suggest<'e, E>(
        &self,
        executor: E,
        text: &str,
        limit: i64,
    ) -> Result<Vec<NafActivity>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (label_pattern, code_pattern) = suggest_patterns(text);
        let activities = sqlx::query_as::<_, NafActivity>(SUGGEST_SQL)
            .bind(label_pattern)
            .bind(code_pattern)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(activities)
    }

    /// Exact label, ignoring case.
    pub async fn find_by_label<'e, E>(
        &self,
        executor: E,
        label: &str,
    ) -> Result<Option<NafActivity>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let activity = sqlx::query_as::<_, NafActivity>(
            r#"
            SELECT REPLACE(codenaf, ' ', '') AS codenaf, nafvfinale
            FROM nafv2
            WHERE nafvfinale ILIKE $1
            LIMIT 1
            "#,
        )
        .bind(exact_pattern(label))
        .fetch_optional(executor)
        .await?;

        Ok(activity)
    }

    /// Alphabetically first label containing `text`.
    pub async fn find_first_containing<'e, E>(
        &self,
        executor: E,
        text: &str,
    ) -> Result<Option<NafActivity>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let activity = sqlx::query_as::<_, NafActivity>(
            r#"
            SELECT REPLACE(codenaf, ' ', '') AS codenaf, nafvfinale
            FROM nafv2
            WHERE nafvfinale ILIKE $1
            ORDER BY nafvfinale
            LIMIT 1
            "#,
        )
        .bind(contains_pattern(text))
        .fetch_optional(executor)
        .await?;

        Ok(activity)
    }
}
