// src/db/search_query.rs
//
// Builds the `/api/search` statement. Every mode shares the same joins; only
// the WHERE clause changes, and the user's text is always bound as `$1`.

use crate::{
    common::error::AppError,
    db::statement::{contains_pattern, BindValue, Statement},
    models::company::{SearchFilters, SearchMode},
};

pub const SEARCH_LIMIT: usize = 20;

const SEARCH_SELECT: &str = r#"
    SELECT u.siren, u.denominationunitelegale,
           e.siret,
           TRIM(REPLACE(e.activiteprincipaleetablissement, ' ', '')) AS activiteprincipaleetablissement,
           a.libellecommuneetablissement,
           n.nafvfinale AS activite_nom
    FROM unitelegale u
    LEFT JOIN etablissement e ON TRIM(u.siren) = TRIM(e.siren)
    LEFT JOIN staging_adresse a ON TRIM(e.siret) = TRIM(a.siret)
    LEFT JOIN nafv2 n ON REPLACE(e.activiteprincipaleetablissement, ' ', '') = REPLACE(n.codenaf, ' ', '')
"#;

const SIREN_FILTER: &str = "WHERE u.siren LIKE $1 OR e.siret LIKE $1";

const SIRET_FILTER: &str = "WHERE e.siret LIKE $1";

const NAME_FILTER: &str =
    "WHERE u.denominationunitelegale ILIKE $1 OR e.denominationusuelleetablissement ILIKE $1";

const ACTIVITY_FILTER: &str = r#"
    WHERE TRIM(REPLACE(e.activiteprincipaleetablissement, ' ', '')) ILIKE $1
       OR TRIM(REPLACE(n.codenaf, ' ', '')) ILIKE $1
       OR n.nafvfinale ILIKE $1
"#;

/// `62/01Z` and `62.01Z` both become `62.01Z`.
pub fn normalize_activity_query(query: &str) -> String {
    query.replace('/', ".").trim().to_string()
}

pub fn build(filters: &SearchFilters) -> Result<Statement, AppError> {
    let query = filters.query.trim();
    if query.is_empty() {
        return Err(AppError::MissingQuery);
    }

    let (filter, value) = match filters.mode {
        SearchMode::Siren => (SIREN_FILTER, query.to_string()),
        SearchMode::Siret => (SIRET_FILTER, query.to_string()),
        SearchMode::Name => (NAME_FILTER, query.to_string()),
        SearchMode::Activity => (ACTIVITY_FILTER, normalize_activity_query(query)),
    };

    Ok(Statement {
        sql: format!("{SEARCH_SELECT}{filter}\n    LIMIT {SEARCH_LIMIT}"),
        values: vec![BindValue::Text(contains_pattern(&value))],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_value(statement: &Statement) -> &str {
        match statement.values.as_slice() {
            [BindValue::Text(value)] => value,
            other => panic!("expected a single text value, got {other:?}"),
        }
    }

    #[test]
    fn hostile_input_only_reaches_the_parameters() {
        for mode in [SearchMode::Siren, SearchMode::Siret, SearchMode::Name, SearchMode::Activity] {
            let plain = build(&SearchFilters::new(mode, "acme")).unwrap();
            for hostile in ["x'; DROP TABLE unitelegale; --", "' OR '1'='1", "a;b", "--"] {
                let built = build(&SearchFilters::new(mode, hostile)).unwrap();
                assert_eq!(built.sql, plain.sql, "template changed for {mode}");
                assert!(!built.sql.contains(hostile));
                assert!(text_value(&built).contains(hostile), "{mode}: {hostile}");
            }
        }
    }

    #[test]
    fn every_mode_has_one_placeholder_and_the_cap() {
        for mode in [SearchMode::Siren, SearchMode::Siret, SearchMode::Name, SearchMode::Activity] {
            let built = build(&SearchFilters::new(mode, "42")).unwrap();
            assert_eq!(built.values.len(), 1);
            assert!(built.sql.contains("$1"));
            assert!(!built.sql.contains("$2"));
            assert!(built.sql.trim_end().ends_with("LIMIT 20"));
            assert!(built.sql.contains("LEFT JOIN staging_adresse"));
            assert!(built.sql.contains("LEFT JOIN nafv2"));
        }
    }

    #[test]
    fn modes_pick_their_columns() {
        let siren = build(&SearchFilters::new(SearchMode::Siren, "732829320")).unwrap();
        assert!(siren.sql.contains("u.siren LIKE $1 OR e.siret LIKE $1"));
        assert_eq!(text_value(&siren), "%732829320%");

        let siret = build(&SearchFilters::new(SearchMode::Siret, "73282932000074")).unwrap();
        assert!(siret.sql.contains("WHERE e.siret LIKE $1"));

        let name = build(&SearchFilters::new(SearchMode::Name, "acme")).unwrap();
        assert!(name.sql.contains("u.denominationunitelegale ILIKE $1"));
        assert!(name.sql.contains("e.denominationusuelleetablissement ILIKE $1"));
    }

    #[test]
    fn activity_codes_with_slash_or_dot_compare_equal() {
        let dotted = build(&SearchFilters::new(SearchMode::Activity, "62.01Z")).unwrap();
        let slashed = build(&SearchFilters::new(SearchMode::Activity, " 62/01Z ")).unwrap();
        assert_eq!(dotted, slashed);
        assert_eq!(text_value(&dotted), "%62.01Z%");
        assert_eq!(normalize_activity_query("62/01Z"), normalize_activity_query("62.01Z"));
    }

    #[test]
    fn blank_query_builds_nothing() {
        assert!(matches!(
            build(&SearchFilters::new(SearchMode::Name, "  ")),
            Err(AppError::MissingQuery)
        ));
    }

    #[test]
    fn like_wildcards_typed_by_the_user_are_literal() {
        let built = build(&SearchFilters::new(SearchMode::Name, "100%")).unwrap();
        assert_eq!(text_value(&built), "%100\\%%");
    }
}
