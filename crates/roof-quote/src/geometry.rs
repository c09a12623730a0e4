//! Core geometry types for roof outlines.
//!
//! Coordinates are geographic degrees, but every routine here treats them as
//! planar (x = longitude, y = latitude). Conversion to meters happens in
//! [`crate::area`], which is only valid at roof scale.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
///
/// Serialized as a `[lng, lat]` pair, the order GeoJSON and map SDKs use.
///
/// ## Rust Lesson #2: serde `from` / `into`
///
/// In JS you'd map `[lng, lat]` to `{ lng, lat }` by hand after
/// `JSON.parse`. Here serde goes through `[f64; 2]` for us: the two `From`
/// impls below are the whole conversion, and a three-element array is a
/// parse error instead of a silently ignored value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lng, c.lat]
    }
}

/// Axis-aligned box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        c.lng >= self.west && c.lng <= self.east && c.lat >= self.south && c.lat <= self.north
    }

    /// Boxes that only touch along an edge count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.west <= other.east
            && other.west <= self.east
            && self.south <= other.north
            && other.south <= self.north
    }
}

/// An ordered polygon boundary.
///
/// By convention the first and last coordinate are equal, but open rings are
/// accepted everywhere: [`Ring::closed`] normalizes and [`Ring::open_vertices`]
/// strips the duplicate again for computations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(pub Vec<Coordinate>);

impl Ring {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    pub fn from_pairs(pairs: &[[f64; 2]]) -> Self {
        Self(pairs.iter().copied().map(Coordinate::from).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    /// True when the ring has at least two points and ends where it starts.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Copy of the ring with the first point appended if it isn't already closed.
    pub fn closed(&self) -> Ring {
        let mut points = self.0.clone();
        if !self.is_empty() && !self.is_closed() {
            points.push(self.0[0]);
        }
        Ring(points)
    }

    /// The distinct vertices: the ring without its closing duplicate.
    ///
    /// Averages over vertices must use this, otherwise the first vertex is
    /// counted twice for closed rings.
    pub fn open_vertices(&self) -> &[Coordinate] {
        if self.is_closed() {
            &self.0[..self.0.len() - 1]
        } else {
            &self.0
        }
    }

    /// Signed Shoelace area in square degrees.
    ///
    /// - Positive for counter-clockwise winding (lng east, lat north)
    /// - Negative for clockwise winding
    /// - Zero for fewer than 3 vertices
    pub fn signed_area_degrees(&self) -> f64 {
        signed_area_of_points(self.open_vertices())
    }

    /// Arithmetic mean of the distinct vertices, `(0, 0)` for an empty ring.
    pub fn vertex_mean(&self) -> Coordinate {
        let pts = self.open_vertices();
        if pts.is_empty() {
            return Coordinate::new(0.0, 0.0);
        }
        let n = pts.len() as f64;
        let sum_lng: f64 = pts.iter().map(|p| p.lng).sum();
        let sum_lat: f64 = pts.iter().map(|p| p.lat).sum();
        Coordinate::new(sum_lng / n, sum_lat / n)
    }

    /// Area-weighted polygon centroid.
    ///
    /// Falls back to [`Ring::vertex_mean`] when the signed area is zero
    /// (collinear or repeated points) or there are fewer than 3 vertices.
    pub fn centroid(&self) -> Coordinate {
        let pts = self.open_vertices();
        let signed = signed_area_of_points(pts);
        if pts.len() < 3 || signed.abs() <= DEGENERATE_AREA_DEG2 {
            tracing::debug!(
                vertices = pts.len(),
                signed_area = signed,
                "degenerate ring, using vertex mean"
            );
            return self.vertex_mean();
        }

        // Accumulate relative to the first vertex, then shift back.
        let origin = pts[0];
        let n = pts.len();
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let (ax, ay) = (pts[i].lng - origin.lng, pts[i].lat - origin.lat);
            let (bx, by) = (pts[(i + 1) % n].lng - origin.lng, pts[(i + 1) % n].lat - origin.lat);
            let cross = ax * by - bx * ay;
            cx += (ax + bx) * cross;
            cy += (ay + by) * cross;
        }
        let factor = 1.0 / (6.0 * signed);
        Coordinate::new(origin.lng + cx * factor, origin.lat + cy * factor)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.is_empty() {
            return None;
        }
        let west = self.0.iter().map(|p| p.lng).fold(f64::INFINITY, f64::min);
        let south = self.0.iter().map(|p| p.lat).fold(f64::INFINITY, f64::min);
        let east = self.0.iter().map(|p| p.lng).fold(f64::NEG_INFINITY, f64::max);
        let north = self.0.iter().map(|p| p.lat).fold(f64::NEG_INFINITY, f64::max);
        Some(BoundingBox { west, south, east, north })
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// Casts a ray toward increasing longitude and counts edge crossings:
    /// odd = inside. Rings with fewer than 3 vertices contain nothing.
    pub fn contains(&self, c: Coordinate) -> bool {
        let pts = self.open_vertices();
        let n = pts.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (pts[i].lng, pts[i].lat);
            let (xj, yj) = (pts[j].lng, pts[j].lat);
            let crosses = (yi > c.lat) != (yj > c.lat);
            if crosses && c.lng < (xj - xi) * (c.lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

/// Below this many square degrees (~1e-8 m²) a ring has no usable centroid.
const DEGENERATE_AREA_DEG2: f64 = 1e-18;

/// Signed Shoelace area of a vertex sequence, wrapping from last to first.
///
/// Vertices are taken relative to the first one. The sum is translation
/// invariant, and at roof scale raw longitudes near ±180 would otherwise
/// cancel away most of the significant digits.
pub fn signed_area_of_points(points: &[Coordinate]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let origin = points[0];
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (xi, yi) = (points[i].lng - origin.lng, points[i].lat - origin.lat);
        let (xj, yj) = (points[j].lng - origin.lng, points[j].lat - origin.lat);
        area += xi * yj;
        area -= xj * yi;
    }
    area / 2.0
}
