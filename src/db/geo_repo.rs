// src/db/geo_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::geo_query,
    models::geo::{BoundingBox, GeoHit, MapPin, RadiusArea},
};

/// Read-only access to `geolocalisation` joined to the establishments.
#[derive(Clone, Copy, Default)]
pub struct GeoRepository;

impl GeoRepository {
    pub async fn find_pins<'e, E>(
        &self,
        executor: E,
        bbox: &BoundingBox,
        activity: Option<&str>,
    ) -> Result<Vec<MapPin>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let statement = geo_query::build_map_query(bbox, activity);
        tracing::debug!(values = ?statement.values, "🔎 Requête carte");

        Ok(statement.fetch_all(executor).await?)
    }

    pub async fn find_in_radius<'e, E>(
        &self,
        executor: E,
        area: &RadiusArea,
        activity_code: &str,
    ) -> Result<Vec<GeoHit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let statement = geo_query::build_radius_query(area, activity_code);
        tracing::debug!(values = ?statement.values, "🔎 Requête par rayon");

        Ok(statement.fetch_all(executor).await?)
    }
}
