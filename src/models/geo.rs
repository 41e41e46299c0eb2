// src/models/geo.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Kilometres per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.32;
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 50.0;

/// Rectangle in degrees used as the SQL prefilter of every geo query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Box whose half-width is the radius converted to degrees at `lat`.
    /// The radius is clamped to [`MIN_RADIUS_KM`, `MAX_RADIUS_KM`].
    pub fn around(lat: f64, lon: f64, radius_km: f64) -> Self {
        let radius_km = radius_km.clamp(MIN_RADIUS_KM, MAX_RADIUS_KM);
        let delta_lat = radius_km / KM_PER_DEGREE;
        // cos() reaches 0 at the poles
        let delta_lon = radius_km / (KM_PER_DEGREE * lat.to_radians().cos().max(0.01));

        Self {
            min_lon: lon - delta_lon,
            max_lon: lon + delta_lon,
            min_lat: lat - delta_lat,
            max_lat: lat + delta_lat,
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Validated centre and radius of a radius search, with its SQL prefilter box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusArea {
    pub latitude: f64,
    pub longitude: f64,
    /// Already clamped to [`MIN_RADIUS_KM`, `MAX_RADIUS_KM`].
    pub radius_km: f64,
    pub bbox: BoundingBox,
}

// ---
// GET /api/maps
// ---

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MapsParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Kilometres, 5 when omitted.
    pub radius: Option<f64>,
    /// NAF code; every activity when omitted.
    pub activity: Option<String>,
}

/// Establishment pin returned by `/api/maps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MapPin {
    pub denominationusuelleetablissement: Option<String>,
    pub activiteprincipaleetablissement: Option<String>,
    pub activite_nom: Option<String>,
    pub siret: String,
    pub x_longitude: f64,
    pub y_latitude: f64,
}

// ---
// POST /api/companies/search
// ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoFilters {
    /// NAF code, e.g. `08.11Z`.
    pub activity_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres.
    pub radius: f64,
}

/// `x` is the longitude and `y` the latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GeoHit {
    pub siret: String,
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: (f64, f64) = (48.8566, 2.3522);

    #[test]
    fn box_keeps_neighbours_and_drops_far_points_for_every_radius() {
        for radius in [0.0, 0.5, 1.0, 5.0, 10.0, 25.0, 50.0, 500.0] {
            let bbox = BoundingBox::around(PARIS.0, PARIS.1, radius);
            assert!(bbox.contains(48.86, 2.36), "radius {radius}");
            assert!(!bbox.contains(49.5, 2.35), "radius {radius}");
        }
    }

    #[test]
    fn box_width_follows_radius() {
        let small = BoundingBox::around(PARIS.0, PARIS.1, 2.0);
        let large = BoundingBox::around(PARIS.0, PARIS.1, 20.0);
        assert!(large.max_lat - large.min_lat > small.max_lat - small.min_lat);
        assert!((small.max_lat - PARIS.0 - 2.0 / KM_PER_DEGREE).abs() < 1e-9);
        // a degree of longitude is shorter than a degree of latitude away from the equator
        assert!(small.max_lon - PARIS.1 > small.max_lat - PARIS.0);
    }

    #[test]
    fn box_stays_finite_at_the_pole() {
        let bbox = BoundingBox::around(90.0, 0.0, 10.0);
        assert!(bbox.min_lon.is_finite() && bbox.max_lon.is_finite());
    }
}
