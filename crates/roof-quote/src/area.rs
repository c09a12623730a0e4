//! Roof area from a geographic ring.
//!
//! Uses the Shoelace area in square degrees scaled by a local
//! meters-per-degree approximation at the ring's mean latitude. This is a
//! small-area planar approximation: good to well under 1% for roof-sized
//! outlines (tens to low hundreds of meters across), not for parcels or
//! anything spanning a noticeable fraction of a degree.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::geometry::Ring;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub const SQ_FT_PER_SQ_M: f64 = 10.7639;

/// Meters spanned by one degree of (latitude, longitude) at `lat_deg`.
#[inline]
pub fn meters_per_degree(lat_deg: f64) -> (f64, f64) {
    let per_lat = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    let per_lng = per_lat * lat_deg.to_radians().cos();
    (per_lat, per_lng)
}

/// A measured area in both unit systems plus its display string.
///
/// The only constructor takes square meters, so the three fields are always
/// derived from the same value.
///
/// ## Rust Lesson #3: Private Fields
///
/// The fields have no `pub`, so code outside this module can read them
/// through the accessors but never build a `RoofArea` whose square feet
/// disagree with its square meters. Deserializing goes through
/// `AreaRecord` for the same reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AreaRecord")]
pub struct RoofArea {
    square_meters: f64,
    square_feet: f64,
    formatted: String,
}

/// Wire shape accepted on input. Only square meters is trusted; the other
/// fields are re-derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AreaRecord {
    square_meters: f64,
}

impl From<AreaRecord> for RoofArea {
    fn from(record: AreaRecord) -> Self {
        RoofArea::from_square_meters(record.square_meters)
    }
}

impl RoofArea {
    pub fn from_square_meters(square_meters: f64) -> Self {
        let square_feet = square_meters * SQ_FT_PER_SQ_M;
        Self {
            square_meters,
            square_feet,
            formatted: format!("{:.2}", square_feet),
        }
    }

    pub fn zero() -> Self {
        Self::from_square_meters(0.0)
    }

    #[inline]
    pub fn square_meters(&self) -> f64 {
        self.square_meters
    }

    #[inline]
    pub fn square_feet(&self) -> f64 {
        self.square_feet
    }

    /// Square feet with exactly two decimals, e.g. `"1035.87"`.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

impl Default for RoofArea {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for RoofArea {
    type Output = RoofArea;

    fn add(self, rhs: RoofArea) -> RoofArea {
        RoofArea::from_square_meters(self.square_meters + rhs.square_meters)
    }
}

impl Sum for RoofArea {
    fn sum<I: Iterator<Item = RoofArea>>(iter: I) -> RoofArea {
        RoofArea::from_square_meters(iter.fold(0.0, |acc, a| acc + a.square_meters))
    }
}

impl<'a> Sum<&'a RoofArea> for RoofArea {
    fn sum<I: Iterator<Item = &'a RoofArea>>(iter: I) -> RoofArea {
        RoofArea::from_square_meters(iter.fold(0.0, |acc, a| acc + a.square_meters))
    }
}

/// Area of a ring. Rings with fewer than 3 distinct vertices measure zero,
/// so an outline that is still being drawn is not an error.
pub fn compute_area(ring: &Ring) -> RoofArea {
    let pts = ring.open_vertices();
    if pts.len() < 3 {
        tracing::debug!(vertices = pts.len(), "ring too short to enclose an area");
        return RoofArea::zero();
    }

    let area_deg2 = ring.signed_area_degrees().abs();
    let avg_lat = pts.iter().map(|p| p.lat).sum::<f64>() / pts.len() as f64;
    let (per_lat, per_lng) = meters_per_degree(avg_lat);

    RoofArea::from_square_meters(area_deg2 * per_lat * per_lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn white_house_square() -> Ring {
        Ring::from_pairs(&[
            [-77.0365, 38.8977],
            [-77.0364, 38.8977],
            [-77.0364, 38.8976],
            [-77.0365, 38.8976],
        ])
    }

    /// Spherical polygon area (the formula GeoJSON area tools use), computed
    /// independently of the planar approximation.
    fn spherical_area_m2(ring: &Ring) -> f64 {
        let pts = ring.open_vertices();
        let n = pts.len();
        let mut total = 0.0;
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            total += (b.lng - a.lng).to_radians()
                * (2.0 + a.lat.to_radians().sin() + b.lat.to_radians().sin());
        }
        (total * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
    }

    #[test]
    fn fields_derive_from_one_value() {
        let area = RoofArea::from_square_meters(100.0);
        assert_eq!(area.square_meters(), 100.0);
        assert_relative_eq!(area.square_feet(), 1076.39, epsilon = 1e-9);
        assert_eq!(area.formatted(), "1076.39");
    }

    #[test]
    fn formatted_always_has_two_decimals() {
        assert_eq!(RoofArea::zero().formatted(), "0.00");
        assert_eq!(RoofArea::from_square_meters(1.0).formatted(), "10.76");
    }

    #[test]
    fn short_rings_measure_zero() {
        assert_eq!(compute_area(&Ring::default()), RoofArea::zero());
        let two = Ring::from_pairs(&[[0.0, 0.0], [0.001, 0.001]]);
        assert_eq!(compute_area(&two).square_meters(), 0.0);
        // closed two-point "triangle" is still only 2 distinct vertices
        assert_eq!(compute_area(&two.closed()).square_meters(), 0.0);
    }

    #[test]
    fn roof_square_matches_spherical_area() {
        let ring = white_house_square();
        let area = compute_area(&ring);
        let reference = spherical_area_m2(&ring);

        let rel_err = (area.square_meters() - reference).abs() / reference;
        assert!(
            rel_err < 0.01,
            "planar {} vs spherical {} ({:.4}%)",
            area.square_meters(),
            reference,
            rel_err * 100.0
        );
        let sq_ft = area.square_feet();
        assert!(sq_ft > 900.0 && sq_ft < 1200.0, "got {} sq ft", sq_ft);
    }

    #[test]
    fn closing_does_not_change_area() {
        let ring = white_house_square();
        assert_eq!(compute_area(&ring), compute_area(&ring.closed()));
    }

    #[test]
    fn winding_does_not_change_area() {
        let ring = white_house_square();
        let mut reversed = ring.0.clone();
        reversed.reverse();
        assert_relative_eq!(
            compute_area(&ring).square_meters(),
            compute_area(&Ring(reversed)).square_meters(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn sum_rederives_fields() {
        let parts = [RoofArea::from_square_meters(1.5), RoofArea::from_square_meters(2.5)];
        let total: RoofArea = parts.iter().sum();
        assert_eq!(total, RoofArea::from_square_meters(4.0));

        let one = RoofArea::from_square_meters(1.0);
        assert_eq!(one.clone() + one, RoofArea::from_square_meters(2.0));
    }

    #[test]
    fn deserializing_ignores_inconsistent_fields() {
        let json = r#"{"squareMeters": 10.0, "squareFeet": 1.0, "formatted": "bogus"}"#;
        let area: RoofArea = serde_json::from_str(json).unwrap();
        assert_eq!(area, RoofArea::from_square_meters(10.0));
    }
}
