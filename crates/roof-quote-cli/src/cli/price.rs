//! Price command: measured roofs (or a single area) to a quote amount.

use serde::Serialize;

use roof_quote::error::Result;
use roof_quote::{
    PriceCalculationData, PricingConfig, QuoteError, SlopeType, parse_roofs, price_roofs,
    round_currency,
};

use super::common::{config_path, flag_value, parse_finite, read_input};

/// Single-area pricing result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AreaPrice {
    roof_area: f64,
    slope: Option<SlopeType>,
    multiplier: f64,
    price: f64,
    rounded_price: f64,
}

/// Execute the price command.
pub fn cmd_price(args: &[String]) -> Result<()> {
    let mut input_path: Option<&str> = None;
    let mut area: Option<f64> = None;
    let mut slope_name: Option<&str> = None;
    let mut cost: Option<f64> = None;
    let mut config_file: Option<&str> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--area" => area = Some(parse_finite(flag_value(args, &mut i, "--area")?, "--area")?),
            "--slope" => slope_name = Some(flag_value(args, &mut i, "--slope")?),
            "-c" | "--cost" => {
                cost = Some(parse_finite(flag_value(args, &mut i, "--cost")?, "--cost")?)
            }
            "--config" => config_file = Some(flag_value(args, &mut i, "--config")?),
            "--json" => json = true,
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

    let config = PricingConfig::resolve(config_path(config_file))?;
    let table = config.table();
    let cost = cost.or(config.material_cost_per_unit).ok_or_else(|| {
        QuoteError::InvalidArgument(
            "--cost required (or set material_cost_per_unit in the config)".to_string(),
        )
    })?;
    if cost < 0.0 {
        return Err(QuoteError::InvalidArgument(format!(
            "--cost must be non-negative, got {}",
            cost
        )));
    }

    if let Some(roof_area) = area {
        let slope = slope_name.and_then(SlopeType::parse);
        let multiplier = match slope_name {
            Some(name) => table.multiplier_for_name(name),
            None => table.multiplier(None),
        };
        let data = PriceCalculationData {
            roof_area,
            slope,
            material_cost_per_unit: cost,
        };
        let price = data.calculate(&table);

        if json {
            let result = AreaPrice {
                roof_area,
                slope,
                multiplier,
                price,
                rounded_price: round_currency(price),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{:.2} sq ft × {} × {}{:.2} = {}{:.2}",
                roof_area,
                multiplier,
                config.currency,
                cost,
                config.currency,
                round_currency(price)
            );
        }
        return Ok(());
    }

    let input_path = input_path.ok_or_else(|| {
        QuoteError::InvalidArgument("roofs file or --area required (use '-' for stdin)".to_string())
    })?;
    let roofs = parse_roofs(&read_input(input_path)?)?;
    let estimate = price_roofs(&roofs, cost, &table);

    if json {
        let mut value = serde_json::to_value(&estimate)?;
        value["roundedTotal"] = estimate.rounded_total().into();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for line in &estimate.lines {
        let slope = line.slope.map(|s| s.name()).unwrap_or("Unknown");
        println!(
            "{:<14} {:>10.2} sq ft  {:<8} ×{:<4} {}{:>10.2}",
            line.label,
            line.square_feet,
            slope,
            line.multiplier,
            config.currency,
            round_currency(line.cost)
        );
    }
    println!(
        "{:<14} {:>10} sq ft  {:<14} {}{:>10.2}",
        "Total",
        estimate.total_area.formatted(),
        "",
        config.currency,
        estimate.rounded_total()
    );
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  roof-quote price <roofs.json|-> --cost <per sq ft> [--config file] [--json]");
    eprintln!("  roof-quote price --area <sq ft> --slope <slope> --cost <per sq ft> [--json]");
}
