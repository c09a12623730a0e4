//! JSON documents exchanged with callers.

use crate::error::{QuoteError, Result};
use crate::geometry::Ring;
use crate::roof::RoofPolygon;

/// Parse an array of rings: `[[[lng, lat], ...], ...]`.
pub fn parse_rings(json: &str) -> Result<Vec<Ring>> {
    let rings: Vec<Ring> = serde_json::from_str(json)?;
    let bad = rings
        .iter()
        .flat_map(|r| r.points())
        .find(|c| !c.lng.is_finite() || !c.lat.is_finite());
    if let Some(bad) = bad {
        return Err(QuoteError::InvalidArgument(format!("non-finite coordinate {:?}", bad)));
    }
    Ok(rings)
}

/// Parse a roof record list as produced by `build_roof_polygons`, possibly
/// edited to set `slope` or `included`.
///
/// Each record is re-measured from its coordinates; one whose stored area or
/// label was edited fails the whole document.
pub fn parse_roofs(json: &str) -> Result<Vec<RoofPolygon>> {
    Ok(serde_json::from_str(json)?)
}
