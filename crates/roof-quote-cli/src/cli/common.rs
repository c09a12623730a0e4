//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read as IoRead};
use std::path::{Path, PathBuf};

use roof_quote::area::meters_per_degree;
use roof_quote::error::Result;
use roof_quote::{QuoteError, RoofPolygon};

/// Output format for measured roofs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Json,
    Svg,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// Read a document from a file path, or from stdin when the path is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        tracing::debug!("reading input from stdin");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(|source| QuoteError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
        return Ok(buffer);
    }

    tracing::debug!(path, "reading input");
    fs::read_to_string(path).map_err(|source| QuoteError::Io {
        path: PathBuf::from(path),
        source,
    })
}

/// Write to a file, or stdout when `path` is `None` or `-`.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(p) if p != "-" => {
            fs::write(p, content).map_err(|source| QuoteError::Io {
                path: PathBuf::from(p),
                source,
            })?;
            eprintln!("Wrote: {}", p);
            Ok(())
        }
        _ => {
            print!("{}", content);
            Ok(())
        }
    }
}

/// Parse the value following a flag, advancing the cursor past it.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| QuoteError::InvalidArgument(format!("{} requires a value", flag)))
}

pub fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T> {
    value.parse().map_err(|_| {
        QuoteError::InvalidArgument(format!("{} expects a number, got '{}'", flag, value))
    })
}

/// Like [`parse_number`], but `NaN` and infinities are rejected too.
pub fn parse_finite(value: &str, flag: &str) -> Result<f64> {
    let number: f64 = parse_number(value, flag)?;
    if !number.is_finite() {
        return Err(QuoteError::InvalidArgument(format!(
            "{} expects a finite number, got '{}'",
            flag, value
        )));
    }
    Ok(number)
}

pub fn config_path(path: Option<&str>) -> Option<&Path> {
    path.map(Path::new)
}

/// Render roof outlines as an SVG preview with their labels.
///
/// Coordinates are projected to local meters around the bounding box of all
/// roofs (north up), so the viewBox is in meters.
pub fn roofs_to_svg(roofs: &[RoofPolygon]) -> String {
    let all: Vec<_> = roofs
        .iter()
        .flat_map(|r| r.coordinates().points().iter().copied())
        .collect();

    let mut svg = String::new();
    if all.is_empty() {
        svg.push_str(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
</svg>
"#,
        );
        return svg;
    }

    let west = all.iter().map(|c| c.lng).fold(f64::INFINITY, f64::min);
    let east = all.iter().map(|c| c.lng).fold(f64::NEG_INFINITY, f64::max);
    let south = all.iter().map(|c| c.lat).fold(f64::INFINITY, f64::min);
    let north = all.iter().map(|c| c.lat).fold(f64::NEG_INFINITY, f64::max);
    let (per_lat, per_lng) = meters_per_degree((south + north) / 2.0);

    let padding = 2.0;
    let width = (east - west) * per_lng + padding * 2.0;
    let height = (north - south) * per_lat + padding * 2.0;
    let project = |lng: f64, lat: f64| {
        ((lng - west) * per_lng + padding, (north - lat) * per_lat + padding)
    };

    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.2} {:.2}">
<g stroke="black" stroke-width="0.2" fill="none">
"#,
        width, height
    ));

    for roof in roofs {
        let points = roof.coordinates().points();
        if points.len() < 2 {
            continue;
        }
        let d: String = points
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let (x, y) = project(c.lng, c.lat);
                if i == 0 {
                    format!("M{:.2},{:.2}", x, y)
                } else {
                    format!(" L{:.2},{:.2}", x, y)
                }
            })
            .collect();
        let dash = if roof.included { "" } else { r#" stroke-dasharray="1,1""# };
        svg.push_str(&format!("  <path id=\"{}\" d=\"{} Z\"{}/>\n", roof.id(), d, dash));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g font-size=\"2\" text-anchor=\"middle\" fill=\"black\">\n");
    for roof in roofs {
        let center = roof.center_point();
        let (x, y) = project(center.lng, center.lat);
        svg.push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\">{} ({} sq ft)</text>\n",
            x,
            y,
            roof.label(),
            roof.area().formatted()
        ));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}
