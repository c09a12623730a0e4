//! Building selection under a clicked point.
//!
//! The map collaborator queries a vector tile service for building
//! footprints inside [`search_bounds`], then hands the candidates to
//! [`select_building`] to find the one the user clicked.

use crate::area::meters_per_degree;
use crate::geometry::{BoundingBox, Coordinate, Ring};

/// Box extending `radius_m` meters from `center` in each direction.
pub fn search_bounds(center: Coordinate, radius_m: f64) -> BoundingBox {
    let (per_lat, per_lng) = meters_per_degree(center.lat);
    let d_lat = radius_m / per_lat;
    // Longitude degrees blow up near the poles; clamp to the whole range.
    let d_lng = if per_lng.abs() < f64::EPSILON { 180.0 } else { (radius_m / per_lng).abs() };

    BoundingBox {
        west: center.lng - d_lng,
        south: center.lat - d_lat,
        east: center.lng + d_lng,
        north: center.lat + d_lat,
    }
}

/// Index of the candidate footprint containing `point`.
///
/// When footprints nest (a courtyard building inside a block outline), the
/// smallest one wins. Candidates are pre-filtered by bounding box before the
/// point-in-polygon test.
pub fn select_building(point: Coordinate, candidates: &[Ring]) -> Option<usize> {
    let hit = candidates
        .iter()
        .enumerate()
        .filter(|(_, ring)| ring.bounding_box().is_some_and(|b| b.contains(point)))
        .filter(|(_, ring)| ring.contains(point))
        .map(|(i, ring)| (i, ring.signed_area_degrees().abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i);

    match hit {
        Some(i) => tracing::debug!(index = i, candidates = candidates.len(), "building selected"),
        None => tracing::debug!(candidates = candidates.len(), "no building under point"),
    }
    hit
}
