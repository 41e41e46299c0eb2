// src/db/statement.rs

use sqlx::{postgres::PgRow, Executor, FromRow, Postgres};

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Float(f64),
}

/// SQL text plus the values for its placeholders, in placeholder order.
///
/// User input only ever travels in `values`; `sql` is assembled from
/// constants, so its text does not depend on what the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<BindValue>,
}

impl Statement {
    pub async fn fetch_all<'c, T, E>(&self, executor: E) -> Result<Vec<T>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(&self.sql);
        for value in &self.values {
            query = match value {
                BindValue::Text(text) => query.bind(text.as_str()),
                BindValue::Float(number) => query.bind(*number),
            };
        }
        query.fetch_all(executor).await
    }
}

/// `%input%` with LIKE metacharacters escaped, so the match is a literal
/// substring match. Backslash is the default LIKE escape in Postgres.
pub fn contains_pattern(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() + 2);
    pattern.push('%');
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Same escaping as [`contains_pattern`] without the wildcards: a
/// case-insensitive equality when used with ILIKE.
pub fn exact_pattern(input: &str) -> String {
    let pattern = contains_pattern(input);
    pattern[1..pattern.len() - 1].to_string()
}
