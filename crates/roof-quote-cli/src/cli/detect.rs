//! Detect command: pick the building footprint under a point.

use serde::Serialize;

use roof_quote::error::Result;
use roof_quote::{
    Coordinate, QuoteError, RoofPolygon, Ring, parse_rings, search_bounds, select_building,
};

use super::common::{flag_value, parse_finite, read_input};

#[derive(Serialize)]
struct Detection {
    index: Option<usize>,
    roof: Option<RoofPolygon>,
}

/// Execute the detect command.
pub fn cmd_detect(args: &[String]) -> Result<()> {
    let mut input_path: Option<&str> = None;
    let mut lng: Option<f64> = None;
    let mut lat: Option<f64> = None;
    let mut radius: Option<f64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--lng" => lng = Some(parse_finite(flag_value(args, &mut i, "--lng")?, "--lng")?),
            "--lat" => lat = Some(parse_finite(flag_value(args, &mut i, "--lat")?, "--lat")?),
            "-r" | "--radius" => {
                radius = Some(parse_finite(flag_value(args, &mut i, "--radius")?, "--radius")?)
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path => {
                if input_path.is_none() {
                    input_path = Some(path);
                }
            }
        }
        i += 1;
    }

    let input_path = input_path.ok_or_else(|| {
        QuoteError::InvalidArgument("candidates file required (use '-' for stdin)".to_string())
    })?;
    if let Some(radius) = radius.filter(|r| *r < 0.0) {
        return Err(QuoteError::InvalidArgument(format!(
            "--radius must be non-negative, got {}",
            radius
        )));
    }
    let (lng, lat) = match (lng, lat) {
        (Some(lng), Some(lat)) => (lng, lat),
        _ => return Err(QuoteError::InvalidArgument("--lng and --lat required".to_string())),
    };
    let point = Coordinate::new(lng, lat);

    let mut candidates = parse_rings(&read_input(input_path)?)?;
    let total = candidates.len();

    // Mirror the tile query: only footprints overlapping the search box.
    let mut kept: Vec<usize> = (0..total).collect();
    if let Some(radius) = radius {
        let bounds = search_bounds(point, radius);
        kept.retain(|&idx| {
            candidates[idx]
                .bounding_box()
                .is_some_and(|b| b.intersects(&bounds))
        });
        eprintln!("{} of {} candidates within {} m", kept.len(), total, radius);
    }
    let filtered: Vec<Ring> = kept
        .iter()
        .map(|&idx| std::mem::take(&mut candidates[idx]))
        .collect();

    let selected = select_building(point, &filtered);
    let detection = Detection {
        index: selected.map(|k| kept[k]),
        roof: selected.map(|k| RoofPolygon::from_ring(0, &filtered[k])),
    };
    println!("{}", serde_json::to_string_pretty(&detection)?);
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: roof-quote detect <candidates.json|-> --lng <x> --lat <y> [--radius <m>]");
}
