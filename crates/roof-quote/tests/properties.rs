//! Property tests for ring measurement and pricing.

use proptest::prelude::*;
use roof_quote::{
    Coordinate, Ring, SlopeType, SQ_FT_PER_SQ_M, calculate_quote_price, compute_area, PricingTable,
};

/// Roof-sized rings: 3..12 vertices within ~0.001° of a random base point.
fn roof_ring() -> impl Strategy<Value = Ring> {
    (-170.0..170.0f64, -60.0..60.0f64)
        .prop_flat_map(|(lng, lat)| {
            prop::collection::vec((0.0..0.001f64, 0.0..0.001f64), 3..12).prop_map(move |offsets| {
                Ring::new(
                    offsets
                        .into_iter()
                        .map(|(dx, dy)| Coordinate::new(lng + dx, lat + dy))
                        .collect(),
                )
            })
        })
}

fn slope() -> impl Strategy<Value = Option<SlopeType>> {
    prop_oneof![
        Just(None),
        Just(Some(SlopeType::Flat)),
        Just(Some(SlopeType::Shallow)),
        Just(Some(SlopeType::Medium)),
        Just(Some(SlopeType::Steep)),
    ]
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn square_feet_tracks_square_meters(ring in roof_ring()) {
        let area = compute_area(&ring);
        prop_assert!(close_enough(area.square_feet(), area.square_meters() * SQ_FT_PER_SQ_M));
        prop_assert_eq!(area.formatted(), format!("{:.2}", area.square_feet()));
    }

    #[test]
    fn area_is_rotation_invariant(ring in roof_ring(), shift in 0usize..12) {
        let mut pts = ring.0.clone();
        let k = shift % pts.len();
        pts.rotate_left(k);
        let rotated = Ring::new(pts);
        prop_assert!(close_enough(
            compute_area(&ring).square_meters(),
            compute_area(&rotated).square_meters()
        ));
    }

    #[test]
    fn reversal_flips_sign_not_area(ring in roof_ring()) {
        let mut pts = ring.0.clone();
        pts.reverse();
        let reversed = Ring::new(pts);
        prop_assert!(close_enough(ring.signed_area_degrees(), -reversed.signed_area_degrees()));
        prop_assert!(close_enough(
            compute_area(&ring).square_meters(),
            compute_area(&reversed).square_meters()
        ));
    }

    #[test]
    fn closing_does_not_change_area(ring in roof_ring()) {
        prop_assert_eq!(compute_area(&ring), compute_area(&ring.closed()));
    }

    #[test]
    fn price_is_non_negative(area in 0.0..1e6f64, s in slope(), cost in 0.0..100.0f64) {
        prop_assert!(calculate_quote_price(area, s, cost) >= 0.0);
    }

    #[test]
    fn batching_adds_no_cross_term(
        sections in prop::collection::vec((0.0..5000.0f64, slope()), 1..8),
        cost in 0.0..50.0f64,
    ) {
        let table = PricingTable::default();
        let separate: f64 = sections.iter().map(|(a, s)| calculate_quote_price(*a, *s, cost)).sum();
        let batched = sections
            .iter()
            .fold(0.0, |acc, (a, s)| acc + a * table.multiplier(*s) * cost);
        prop_assert!(close_enough(separate, batched));
    }
}
