//! Roof sections built from detected or drawn outlines.

use serde::{Deserialize, Serialize};

use crate::area::{RoofArea, compute_area};
use crate::geometry::{Coordinate, Ring};
use crate::label::generate_label;
use crate::slope::{self, SlopeType};

/// Relative tolerance when checking a stored area against its coordinates.
/// Covers the last-digit drift of a JSON round trip.
const AREA_TOLERANCE: f64 = 1e-6;

/// One roof section with its measurements.
///
/// Geometry, area, label and center are fixed at creation. Callers may only
/// change the slope classification and whether the section is included in
/// the quote.
///
/// Reading a record back re-measures `coordinates`. A stored area or label
/// that disagrees with the geometry is rejected, so an edited document can
/// never be priced on anything but its own outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RoofRecord")]
pub struct RoofPolygon {
    id: String,
    coordinates: Ring,
    area: RoofArea,
    label: String,
    center_point: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<SlopeType>,
    pub included: bool,
}

/// Wire shape accepted on input. Only `id`, `coordinates`, `slope` and
/// `included` are trusted; the rest is checked or re-derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoofRecord {
    id: String,
    coordinates: Ring,
    #[serde(default)]
    area: Option<RoofArea>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, deserialize_with = "slope::lenient")]
    slope: Option<SlopeType>,
    #[serde(default = "default_included")]
    included: bool,
}

fn default_included() -> bool {
    true
}

/// Position encoded in an id of the form `roof-<index>`.
fn index_from_id(id: &str) -> Option<usize> {
    let index: usize = id.strip_prefix("roof-")?.parse().ok()?;
    (format!("roof-{}", index) == id).then_some(index)
}

// ## Rust Lesson #4: TryFrom at the Boundary
//
// `try_from = "RoofRecord"` makes serde parse the loose wire shape first and
// then call this impl. Returning `Err` here surfaces as an ordinary
// `serde_json::Error`, so a bad record fails the parse like bad syntax does.

impl TryFrom<RoofRecord> for RoofPolygon {
    type Error = String;

    fn try_from(record: RoofRecord) -> Result<Self, Self::Error> {
        let index = index_from_id(&record.id)
            .ok_or_else(|| format!("roof id '{}' is not of the form roof-<index>", record.id))?;
        let mut roof = RoofPolygon::from_ring(index, &record.coordinates);

        if let Some(stored) = &record.area {
            let measured = roof.area.square_meters();
            let drift = (stored.square_meters() - measured).abs();
            if drift > AREA_TOLERANCE * measured.max(1.0) {
                return Err(format!(
                    "{}: stored area {} m² does not match its coordinates ({} m²)",
                    roof.id,
                    stored.square_meters(),
                    measured
                ));
            }
        }
        match &record.label {
            Some(label) if *label != roof.label => {
                return Err(format!(
                    "{}: label '{}' does not match its position ('{}')",
                    roof.id, label, roof.label
                ));
            }
            _ => {}
        }

        roof.slope = record.slope;
        roof.included = record.included;
        Ok(roof)
    }
}

impl RoofPolygon {
    /// Measure one ring. The ring is closed first if needed.
    pub fn from_ring(index: usize, ring: &Ring) -> Self {
        let coordinates = ring.closed();
        let area = compute_area(&coordinates);
        let center_point = coordinates.centroid();
        Self {
            id: format!("roof-{}", index),
            coordinates,
            area,
            label: generate_label(index),
            center_point,
            slope: None,
            included: true,
        }
    }

    pub fn with_slope(mut self, slope: SlopeType) -> Self {
        self.slope = Some(slope);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coordinates(&self) -> &Ring {
        &self.coordinates
    }

    pub fn area(&self) -> &RoofArea {
        &self.area
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center_point(&self) -> Coordinate {
        self.center_point
    }
}

/// Measure every ring in input order.
///
/// A short or degenerate ring yields a zero-area section with a mean-point
/// center; it never affects its siblings.
pub fn build_roof_polygons(rings: &[Ring]) -> Vec<RoofPolygon> {
    let roofs: Vec<RoofPolygon> = rings
        .iter()
        .enumerate()
        .map(|(i, ring)| RoofPolygon::from_ring(i, ring))
        .collect();
    tracing::debug!(count = roofs.len(), "built roof polygons");
    roofs
}

/// Combined area of the included sections.
pub fn total_area(roofs: &[RoofPolygon]) -> RoofArea {
    roofs.iter().filter(|r| r.included).map(|r| r.area()).sum()
}
