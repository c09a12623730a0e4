//! Measure command: rings in, labelled roof sections out.

use roof_quote::error::Result;
use roof_quote::{QuoteError, build_roof_polygons, parse_rings, total_area};

use super::common::{OutputFormat, flag_value, read_input, roofs_to_svg, write_output};

/// Execute the measure command.
pub fn cmd_measure(args: &[String]) -> Result<()> {
    let mut input_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut format = OutputFormat::Json;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                output_path = Some(flag_value(args, &mut i, "--output")?);
            }
            "-f" | "--format" => {
                let name = flag_value(args, &mut i, "--format")?;
                format = OutputFormat::from_name(name).ok_or_else(|| {
                    QuoteError::InvalidArgument(format!(
                        "unknown format: {}. Use 'json' or 'svg'.",
                        name
                    ))
                })?;
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
        QuoteError::InvalidArgument("rings file required (use '-' for stdin)".to_string())
    })?;

    let rings = parse_rings(&read_input(input_path)?)?;
    let roofs = build_roof_polygons(&rings);

    let total = total_area(&roofs);
    eprintln!("Measured {} roof sections, {} sq ft total", roofs.len(), total.formatted());

    let content = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&roofs)?;
            json.push('\n');
            json
        }
        OutputFormat::Svg => roofs_to_svg(&roofs),
    };
    write_output(output_path, &content)
}

fn print_usage() {
    eprintln!("Usage: roof-quote measure <rings.json|-> [-f json|svg] [-o file]");
    eprintln!();
    eprintln!("Input is a JSON array of rings, each an array of [lng, lat] pairs.");
}
