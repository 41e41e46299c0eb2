// src/services/geo_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::GeoRepository,
    models::geo::{
        BoundingBox, GeoFilters, GeoHit, MapPin, RadiusArea, DEFAULT_RADIUS_KM, MAX_RADIUS_KM,
        MIN_RADIUS_KM,
    },
};

/// Checks the centre and radius and turns them into the SQL prefilter box.
pub fn search_area(
    lat: Option<f64>,
    lon: Option<f64>,
    radius_km: Option<f64>,
) -> Result<BoundingBox, AppError> {
    let (lat, lon) = match (lat, lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AppError::InvalidParameter(
                "Les paramètres 'lat' et 'lon' sont obligatoires.".to_string(),
            ));
        }
    };

    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::InvalidParameter(format!("Latitude invalide: {lat}")));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::InvalidParameter(format!("Longitude invalide: {lon}")));
    }

    Ok(BoundingBox::around(lat, lon, effective_radius(radius_km)?))
}

/// Missing radius means 5 km; accepted values are clamped to 1..=50 km.
pub fn effective_radius(radius_km: Option<f64>) -> Result<f64, AppError> {
    match radius_km {
        None => Ok(DEFAULT_RADIUS_KM),
        Some(r) if r.is_finite() && r > 0.0 => Ok(r.clamp(MIN_RADIUS_KM, MAX_RADIUS_KM)),
        Some(r) => Err(AppError::InvalidParameter(format!("Rayon invalide: {r}"))),
    }
}

#[derive(Clone)]
pub struct GeoService {
    repo: GeoRepository,
}

impl GeoService {
    pub fn new(repo: GeoRepository) -> Self {
        Self { repo }
    }

    /// Establishments inside the box, optionally restricted to one NAF code.
    pub async fn find_pins<'e, E>(
        &self,
        executor: E,
        bbox: &BoundingBox,
        activity: Option<&str>,
    ) -> Result<Vec<MapPin>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.find_pins(executor, bbox, activity).await
    }

    /// Establishments of `activity_code` within `area.radius_km` km of the
    /// centre. The distance cut happens in SQL, ahead of the row limit.
    pub async fn search_radius<'e, E>(
        &self,
        executor: E,
        area: &RadiusArea,
        activity_code: &str,
    ) -> Result<Vec<GeoHit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.find_in_radius(executor, area, activity_code).await
    }
}

/// Validation of the radius search body, done before any connection is taken.
pub fn radius_area(filters: &GeoFilters) -> Result<RadiusArea, AppError> {
    if filters.activity_code.trim().is_empty() {
        return Err(AppError::InvalidParameter(
            "Le code d'activité est obligatoire.".to_string(),
        ));
    }
    let radius_km = effective_radius(Some(filters.radius))?;
    let bbox = search_area(Some(filters.latitude), Some(filters.longitude), Some(radius_km))?;
    Ok(RadiusArea {
        latitude: filters.latitude,
        longitude: filters.longitude,
        radius_km,
        bbox,
    })
}
