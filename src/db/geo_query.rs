// src/db/geo_query.rs

use crate::{
    db::statement::{BindValue, Statement},
    models::geo::{BoundingBox, RadiusArea, EARTH_RADIUS_KM},
};

pub const GEO_LIMIT: usize = 50;

const MAP_SELECT: &str = r#"
    SELECT e.denominationusuelleetablissement,
           TRIM(REPLACE(e.activiteprincipaleetablissement, ' ', '')) AS activiteprincipaleetablissement,
           n.nafvfinale AS activite_nom,
           g.siret, g.x_longitude, g.y_latitude
    FROM geolocalisation g
    JOIN etablissement e ON g.siret = e.siret
    LEFT JOIN nafv2 n ON REPLACE(e.activiteprincipaleetablissement, ' ', '') = REPLACE(n.codenaf, ' ', '')
"#;

const RADIUS_SELECT: &str = r#"
    SELECT e.siret, g.x_longitude AS x, g.y_latitude AS y
    FROM geolocalisation g
    JOIN etablissement e ON g.siret = e.siret
"#;

// $1..$4 are always the box, in this order.
const BOX_FILTER: &str = r#"
    WHERE g.x_longitude BETWEEN $1 AND $2
      AND g.y_latitude BETWEEN $3 AND $4
"#;

const ACTIVITY_FILTER: &str =
    "  AND REPLACE(e.activiteprincipaleetablissement, ' ', '') = $5\n";

// Haversine central angle between the row and the centre ($6 lat, $7 lon),
// compared to the radius expressed in radians ($8).
const DISTANCE_FILTER: &str = r#"
      AND 2 * ASIN(LEAST(1.0, SQRT(
            POWER(SIN(RADIANS(g.y_latitude - $6) / 2), 2)
            + COS(RADIANS($6)) * COS(RADIANS(g.y_latitude))
              * POWER(SIN(RADIANS(g.x_longitude - $7) / 2), 2)
          ))) <= $8
"#;

/// NAF codes are compared without any whitespace.
pub fn normalize_code(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

fn box_values(bbox: &BoundingBox) -> Vec<BindValue> {
    vec![
        BindValue::Float(bbox.min_lon),
        BindValue::Float(bbox.max_lon),
        BindValue::Float(bbox.min_lat),
        BindValue::Float(bbox.max_lat),
    ]
}

/// Statement behind `/api/maps`. The activity filter is optional.
pub fn build_map_query(bbox: &BoundingBox, activity: Option<&str>) -> Statement {
    let mut sql = format!("{MAP_SELECT}{BOX_FILTER}");
    let mut values = box_values(bbox);

    if let Some(code) = activity.map(normalize_code).filter(|c| !c.is_empty()) {
        sql.push_str(ACTIVITY_FILTER);
        values.push(BindValue::Text(code));
    }

    sql.push_str(&format!("    LIMIT {GEO_LIMIT}"));
    Statement { sql, values }
}

/// Statement behind `/api/companies/search`: box prefilter, mandatory
/// activity code and the exact great-circle radius, all before the limit.
pub fn build_radius_query(area: &RadiusArea, activity_code: &str) -> Statement {
    let mut values = box_values(&area.bbox);
    values.push(BindValue::Text(normalize_code(activity_code)));
    values.push(BindValue::Float(area.latitude));
    values.push(BindValue::Float(area.longitude));
    values.push(BindValue::Float(area.radius_km / EARTH_RADIUS_KM));

    Statement {
        sql: format!(
            "{RADIUS_SELECT}{BOX_FILTER}{ACTIVITY_FILTER}{DISTANCE_FILTER}    LIMIT {GEO_LIMIT}"
        ),
        values,
    }
}
