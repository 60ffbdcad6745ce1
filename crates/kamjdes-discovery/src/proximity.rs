//! Distance search over geocoded branches.
//!
//! Every location token with a coordinate is treated as an independent branch,
//! so one entity can appear several times in a result list, once per branch in
//! range.

use serde::Serialize;

use kamjdes_core::{Coordinates, Entity};

use crate::error::DiscoveryError;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius choices offered by the nearby view, smallest first.
pub const RADIUS_OPTIONS_KM: [f64; 5] = [0.5, 1.0, 2.0, 5.0, 10.0];

const MAX_RADIUS_KM: f64 = RADIUS_OPTIONS_KM[RADIUS_OPTIONS_KM.len() - 1];

/// A branch within the search radius.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyMatch<'a> {
    pub entity: &'a Entity,
    /// The location token whose coordinate matched.
    pub branch: &'a str,
    pub distance_km: f64,
}

/// Great-circle distance between two points in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Branches within `radius_km` of `user`, nearest first.
///
/// Branch coordinates are looked up by the exact location token; tokens
/// without a coordinate are skipped. The radius is inclusive.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidRadius`] when `radius_km` is not a
/// positive finite number and [`DiscoveryError::InvalidCoordinate`] when
/// `user` is not a valid latitude/longitude pair.
pub fn find_nearby(
    entities: &[Entity],
    user: Coordinates,
    radius_km: f64,
) -> Result<Vec<NearbyMatch<'_>>, DiscoveryError> {
    validate_radius(radius_km)?;
    validate_coordinate(user)?;

    let mut matches = Vec::new();
    for entity in entities {
        if entity.coordinates.is_none() {
            continue;
        }
        for token in entity.location_tokens() {
            let Some(branch) = entity.coordinate_for(token) else {
                continue;
            };
            let distance_km = haversine_km(user, branch);
            if distance_km <= radius_km {
                matches.push(NearbyMatch {
                    entity,
                    branch: token.as_str(),
                    distance_km,
                });
            }
        }
    }

    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::debug!(
        candidates = entities.len(),
        matches = matches.len(),
        radius_km,
        "nearby search complete"
    );

    Ok(matches)
}

/// `"850 m"` below one kilometre, `"1.2 km"` from there up.
#[must_use]
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{:.0} m", (distance_km * 1000.0).round())
    } else {
        format!("{distance_km:.1} km")
    }
}

/// The radius after `current` on the ladder. Unknown values and the top rung
/// both map to the largest radius.
#[must_use]
pub fn next_radius(current: f64) -> f64 {
    RADIUS_OPTIONS_KM
        .iter()
        .position(|&r| (r - current).abs() < f64::EPSILON)
        .and_then(|idx| RADIUS_OPTIONS_KM.get(idx + 1))
        .copied()
        .unwrap_or(MAX_RADIUS_KM)
}

/// Whether a wider radius exists above `current`.
#[must_use]
pub fn can_widen(current: f64) -> bool {
    current < MAX_RADIUS_KM
}

pub(crate) fn validate_radius(radius_km: f64) -> Result<(), DiscoveryError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(DiscoveryError::InvalidRadius(radius_km))
    }
}

pub(crate) fn is_valid_coordinate(point: Coordinates) -> bool {
    point.lat.is_finite()
        && point.lng.is_finite()
        && (-90.0..=90.0).contains(&point.lat)
        && (-180.0..=180.0).contains(&point.lng)
}

fn validate_coordinate(point: Coordinates) -> Result<(), DiscoveryError> {
    if is_valid_coordinate(point) {
        Ok(())
    } else {
        Err(DiscoveryError::InvalidCoordinate {
            lat: point.lat,
            lng: point.lng,
        })
    }
}
