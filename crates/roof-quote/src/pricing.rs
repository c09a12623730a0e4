//! Quote pricing: area × slope multiplier × material cost per unit.
//!
//! Prices are never rounded here. [`round_currency`] is for the display or
//! persistence boundary.

use serde::{Deserialize, Serialize};

use crate::area::RoofArea;
use crate::roof::{RoofPolygon, total_area};
use crate::slope::{self, SlopeType};

/// Multiplier applied when a slope is missing or unrecognized.
pub const DEFAULT_MULTIPLIER: f64 = 0.7;

/// Difficulty multipliers per slope class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingTable {
    pub flat: f64,
    pub shallow: f64,
    pub medium: f64,
    pub steep: f64,
    /// Used for unknown slopes. Not one of the table entries.
    pub default: f64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            flat: 0.4,
            shallow: 0.6,
            medium: 0.8,
            steep: 1.0,
            default: DEFAULT_MULTIPLIER,
        }
    }
}

impl PricingTable {
    /// Multiplier for a slope, falling back to `default` when there is none.
    pub fn multiplier(&self, slope: Option<SlopeType>) -> f64 {
        match slope {
            Some(SlopeType::Flat) => self.flat,
            Some(SlopeType::Shallow) => self.shallow,
            Some(SlopeType::Medium) => self.medium,
            Some(SlopeType::Steep) => self.steep,
            None => self.default,
        }
    }

    /// Multiplier for a slope given by name in any letter case.
    pub fn multiplier_for_name(&self, name: &str) -> f64 {
        let parsed = SlopeType::parse(name);
        if parsed.is_none() {
            tracing::warn!(
                slope = name,
                multiplier = self.default,
                "unknown slope, using default multiplier"
            );
        }
        self.multiplier(parsed)
    }

    pub fn price(
        &self,
        roof_area: f64,
        slope: Option<SlopeType>,
        material_cost_per_unit: f64,
    ) -> f64 {
        roof_area * self.multiplier(slope) * material_cost_per_unit
    }
}

/// Multiplier from the default table.
pub fn slope_multiplier(slope: Option<SlopeType>) -> f64 {
    PricingTable::default().multiplier(slope)
}

pub fn slope_multiplier_for_name(name: &str) -> f64 {
    PricingTable::default().multiplier_for_name(name)
}

/// `roof_area * slope_multiplier(slope) * material_cost_per_unit`, unrounded.
pub fn calculate_quote_price(
    roof_area: f64,
    slope: Option<SlopeType>,
    material_cost_per_unit: f64,
) -> f64 {
    PricingTable::default().price(roof_area, slope, material_cost_per_unit)
}

/// Half-away-from-zero rounding to cents.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Transient pricing input for a single area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculationData {
    pub roof_area: f64,
    #[serde(default, deserialize_with = "slope::lenient")]
    pub slope: Option<SlopeType>,
    pub material_cost_per_unit: f64,
}

impl PriceCalculationData {
    pub fn calculate(&self, table: &PricingTable) -> f64 {
        table.price(self.roof_area, self.slope, self.material_cost_per_unit)
    }
}

/// Price contribution of one roof section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub roof_id: String,
    pub label: String,
    pub square_feet: f64,
    pub slope: Option<SlopeType>,
    pub multiplier: f64,
    pub cost: f64,
}

/// Aggregate over the included roof sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEstimate {
    pub lines: Vec<QuoteLine>,
    pub total_area: RoofArea,
    pub total_cost: f64,
}

impl QuoteEstimate {
    /// Total rounded to cents, for display and storage.
    pub fn rounded_total(&self) -> f64 {
        round_currency(self.total_cost)
    }
}

/// Price each included section at its own slope and sum the results.
///
/// Areas are priced in square feet. The total is the plain sum of the
/// per-section costs; there is no blended multiplier.
pub fn price_roofs(
    roofs: &[RoofPolygon],
    material_cost_per_unit: f64,
    table: &PricingTable,
) -> QuoteEstimate {
    let lines: Vec<QuoteLine> = roofs
        .iter()
        .filter(|r| r.included)
        .map(|r| {
            let square_feet = r.area().square_feet();
            QuoteLine {
                roof_id: r.id().to_string(),
                label: r.label().to_string(),
                square_feet,
                slope: r.slope,
                multiplier: table.multiplier(r.slope),
                cost: table.price(square_feet, r.slope, material_cost_per_unit),
            }
        })
        .collect();

    let total_cost: f64 = lines.iter().fold(0.0, |acc, l| acc + l.cost);
    tracing::debug!(sections = lines.len(), total_cost, "priced roof sections");

    QuoteEstimate {
        lines,
        total_area: total_area(roofs),
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ring;
    use crate::roof::build_roof_polygons;
    use approx::assert_relative_eq;

    #[test]
    fn default_table_values() {
        assert_eq!(slope_multiplier(Some(SlopeType::Flat)), 0.4);
        assert_eq!(slope_multiplier(Some(SlopeType::Shallow)), 0.6);
        assert_eq!(slope_multiplier(Some(SlopeType::Medium)), 0.8);
        assert_eq!(slope_multiplier(Some(SlopeType::Steep)), 1.0);
        assert_eq!(slope_multiplier(None), 0.7);
    }

    #[test]
    fn multiplier_by_name() {
        assert_eq!(slope_multiplier_for_name("Flat"), 0.4);
        assert_eq!(slope_multiplier_for_name("steep"), 1.0);
        assert_eq!(slope_multiplier_for_name("unknown"), 0.7);
    }

    #[test]
    fn default_multiplier_is_not_a_table_entry() {
        let table = PricingTable::default();
        for slope in SlopeType::all() {
            assert_ne!(table.multiplier(Some(*slope)), table.default);
        }
    }

    #[test]
    fn quote_price() {
        assert_eq!(calculate_quote_price(1000.0, Some(SlopeType::Medium), 5.0), 4000.0);
        assert_eq!(calculate_quote_price(0.0, Some(SlopeType::Steep), 5.0), 0.0);
        assert_relative_eq!(calculate_quote_price(100.0, None, 3.0), 210.0, epsilon = 1e-9);
    }

    #[test]
    fn price_is_not_rounded() {
        let price = calculate_quote_price(10.333, Some(SlopeType::Flat), 1.0);
        assert_relative_eq!(price, 4.1332, epsilon = 1e-12);
        assert_eq!(round_currency(price), 4.13);
        assert_eq!(round_currency(2.675_000_1), 2.68);
    }

    #[test]
    fn calculation_data() {
        let json = r#"{"roofArea": 1000, "slope": "medium", "materialCostPerUnit": 5}"#;
        let data: PriceCalculationData = serde_json::from_str(json).unwrap();
        assert_eq!(data.calculate(&PricingTable::default()), 4000.0);

        let json = r#"{"roofArea": 100, "slope": "sideways", "materialCostPerUnit": 1}"#;
        let data: PriceCalculationData = serde_json::from_str(json).unwrap();
        assert_relative_eq!(data.calculate(&PricingTable::default()), 70.0, epsilon = 1e-9);
    }

    fn two_roofs() -> Vec<RoofPolygon> {
        let rings = vec![
            Ring::from_pairs(&[
                [-77.0365, 38.8977],
                [-77.0364, 38.8977],
                [-77.0364, 38.8976],
                [-77.0365, 38.8976],
            ]),
            Ring::from_pairs(&[
                [-77.0363, 38.8977],
                [-77.0361, 38.8977],
                [-77.0361, 38.8976],
                [-77.0363, 38.8976],
            ]),
        ];
        let mut roofs = build_roof_polygons(&rings);
        roofs[0].slope = Some(SlopeType::Steep);
        roofs[1].slope = Some(SlopeType::Flat);
        roofs
    }

    #[test]
    fn multi_roof_price_is_sum_of_sections() {
        let roofs = two_roofs();
        let table = PricingTable::default();
        let estimate = price_roofs(&roofs, 4.5, &table);

        let expected: f64 = roofs
            .iter()
            .map(|r| calculate_quote_price(r.area().square_feet(), r.slope, 4.5))
            .sum();
        assert_relative_eq!(estimate.total_cost, expected, max_relative = 1e-12);
        assert_eq!(estimate.lines.len(), 2);
        assert_eq!(estimate.lines[0].multiplier, 1.0);
        assert_eq!(estimate.lines[1].multiplier, 0.4);
        assert_relative_eq!(
            estimate.total_area.square_feet(),
            roofs[0].area().square_feet() + roofs[1].area().square_feet(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn excluded_roofs_are_not_priced() {
        let mut roofs = two_roofs();
        roofs[1].included = false;
        let estimate = price_roofs(&roofs, 4.5, &PricingTable::default());
        assert_eq!(estimate.lines.len(), 1);
        assert_eq!(estimate.lines[0].roof_id, "roof-0");
        assert_eq!(&estimate.total_area, roofs[0].area());
    }

    #[test]
    fn empty_estimate() {
        let estimate = price_roofs(&[], 4.5, &PricingTable::default());
        assert_eq!(estimate.total_cost, 0.0);
        assert_eq!(estimate.rounded_total(), 0.0);
        assert_eq!(estimate.total_area, RoofArea::zero());
    }
}
