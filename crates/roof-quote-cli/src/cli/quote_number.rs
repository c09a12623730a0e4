//! Quote number command.

use chrono::{Datelike, Local};

use roof_quote::error::Result;
use roof_quote::{QuoteError, generate_quote_number, next_sequence_in_year};

use super::common::{flag_value, parse_number, read_input};

/// Negative years would print a second dash and no longer parse back.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Execute the quote-number command.
///
/// The sequence comes from `--sequence` or is counted from an `--existing`
/// list of issued numbers (one per line).
pub fn cmd_quote_number(args: &[String]) -> Result<()> {
    let mut year: Option<i32> = None;
    let mut sequence: Option<u32> = None;
    let mut existing_path: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-y" | "--year" => {
                year = Some(parse_number(flag_value(args, &mut i, "--year")?, "--year")?)
            }
            "-n" | "--sequence" => {
                let value = flag_value(args, &mut i, "--sequence")?;
                sequence = Some(parse_number(value, "--sequence")?)
            }
            "--existing" => existing_path = Some(flag_value(args, &mut i, "--existing")?),
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => {
                return Err(QuoteError::InvalidArgument(format!("unexpected argument: {}", other)));
            }
        }
        i += 1;
    }

    let year = year.unwrap_or_else(|| Local::now().year());
    if !YEAR_RANGE.contains(&year) {
        return Err(QuoteError::InvalidArgument(format!(
            "--year must be between 0 and 9999, got {}",
            year
        )));
    }
    let sequence = match (sequence, existing_path) {
        (Some(n), None) => n,
        (None, Some(path)) => {
            let content = read_input(path)?;
            next_sequence_in_year(year, content.lines())
        }
        (Some(_), Some(_)) => {
            return Err(QuoteError::InvalidArgument(
                "use either --sequence or --existing, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(QuoteError::InvalidArgument(
                "--sequence or --existing required".to_string(),
            ));
        }
    };

    if sequence == 0 {
        return Err(QuoteError::InvalidArgument("sequence starts at 1".to_string()));
    }

    println!("{}", generate_quote_number(year, sequence));
    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: roof-quote quote-number [--year <yyyy>] (--sequence <n> | --existing <file|->)"
    );
}
