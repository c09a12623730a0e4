//! roof-quote - roof measurement and quote pricing CLI
//!
//! Usage:
//!   roof-quote measure <rings.json>           Measure roof sections
//!   roof-quote price <roofs.json> --cost <n>  Price measured roofs
//!   roof-quote quote-number --sequence <n>    Mint a quote number
//!   roof-quote detect <footprints.json> ...   Select the building under a point
//!   roof-quote slopes                         List slope multipliers

mod cli;

use std::env;

use tracing_subscriber::EnvFilter;

use roof_quote::error::Result;
use roof_quote::{PricingConfig, SlopeType};

use cli::common::{config_path, flag_value};
use cli::{cmd_detect, cmd_measure, cmd_price, cmd_quote_number};

/// Logs go to stderr so stdout stays parseable. Level from `RUST_LOG`,
/// default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(|s| s.as_str()).unwrap_or("roof-quote");

    let result = match args.get(1).map(|s| s.as_str()) {
        Some("measure") => cmd_measure(&args[2..]),
        Some("price") => cmd_price(&args[2..]),
        Some("quote-number") => cmd_quote_number(&args[2..]),
        Some("detect") => cmd_detect(&args[2..]),
        Some("slopes") => cmd_slopes(&args[2..]),
        Some("help" | "--help" | "-h") | None => {
            print_usage(prog);
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(prog);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_slopes(args: &[String]) -> Result<()> {
    let mut config_file: Option<&str> = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" {
            config_file = Some(flag_value(args, &mut i, "--config")?);
        }
        i += 1;
    }

    let table = PricingConfig::resolve(config_path(config_file))?.table();
    println!("Slope multipliers:");
    for slope in SlopeType::all() {
        println!("  {:<8} {}", slope.name(), table.multiplier(Some(*slope)));
    }
    println!("  {:<8} {}", "(other)", table.default);
    Ok(())
}

fn print_usage(prog: &str) {
    eprintln!("roof-quote - roof measurement and quote pricing");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} measure <rings.json|-> [-f json|svg] [-o file]", prog);
    eprintln!("  {} price <roofs.json|-> --cost <n> [--config file] [--json]", prog);
    eprintln!("  {} price --area <sq ft> --slope <slope> --cost <n> [--json]", prog);
    eprintln!("  {} quote-number [--year <yyyy>] (--sequence <n> | --existing <file>)", prog);
    eprintln!("  {} detect <footprints.json|-> --lng <x> --lat <y> [--radius <m>]", prog);
    eprintln!("  {} slopes [--config file]", prog);
    eprintln!();
    eprintln!("Input files:");
    eprintln!("  rings / footprints   JSON array of rings, each an array of [lng, lat] pairs");
    eprintln!(
        "  roofs                output of 'measure', optionally with \"slope\" and \"included\" set"
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ROOF_QUOTE_CONFIG    pricing config YAML used when --config is not given");
    eprintln!("  RUST_LOG             log level (default: warn)");
}
