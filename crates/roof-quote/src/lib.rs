//! # roof-quote
//!
//! Roof outline geometry and quote pricing.
//!
//! Rings of geographic coordinates come in (from a drawing tool or a building
//! footprint lookup), roof sections with area, center and label come out, and
//! those sections are priced by slope and material cost. Everything here is a
//! pure function over plain data except loading a pricing config file.
//!
//! ## Rust Lesson #1: Re-exports
//!
//! Each `pub mod` below is a file in `src/`. The `pub use` lines lift the
//! common items to the crate root, so callers write `roof_quote::Ring`
//! instead of `roof_quote::geometry::Ring` (like an `index.js` that
//! re-exports from its siblings). The long paths keep working too.

pub mod area;
pub mod config;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod input;
pub mod label;
pub mod pricing;
pub mod quote_number;
pub mod roof;
pub mod slope;

// Re-export common types at crate root for convenience.
pub use area::{RoofArea, compute_area, EARTH_RADIUS_M, SQ_FT_PER_SQ_M};
pub use config::PricingConfig;
pub use detect::{search_bounds, select_building};
pub use error::QuoteError;
pub use geometry::{BoundingBox, Coordinate, Ring};
pub use input::{parse_rings, parse_roofs};
pub use label::generate_label;
pub use pricing::{
    PriceCalculationData, PricingTable, QuoteEstimate, QuoteLine, calculate_quote_price,
    price_roofs, round_currency, slope_multiplier, slope_multiplier_for_name,
};
pub use quote_number::{generate_quote_number, next_sequence_in_year, parse_quote_number};
pub use roof::{RoofPolygon, build_roof_polygons, total_area};
pub use slope::SlopeType;
