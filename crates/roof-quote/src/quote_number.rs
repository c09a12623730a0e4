//! Year-scoped quote numbers: `QTE-2025-007`.
//!
//! Uniqueness depends on the caller deriving the sequence from an
//! authoritative count at creation time. Two concurrent creations that read
//! the same count will mint the same number; the store has to reject that
//! (unique constraint or atomic counter).

const PREFIX: &str = "QTE";

/// Format a quote number. Sequences below 1000 are zero-padded to 3 digits;
/// larger ones are printed in full.
pub fn generate_quote_number(year: i32, sequence_in_year: u32) -> String {
    format!("{}-{}-{:03}", PREFIX, year, sequence_in_year)
}

/// Split a quote number back into `(year, sequence)`.
pub fn parse_quote_number(number: &str) -> Option<(i32, u32)> {
    let mut parts = number.trim().splitn(3, '-');
    if parts.next()? != PREFIX {
        return None;
    }
    let year = parts.next()?.parse().ok()?;
    let seq = parts.next()?;
    if seq.len() < 3 || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((year, seq.parse().ok()?))
}

/// Next sequence for `year`: the number of existing quotes from that year
/// plus one. Numbers that don't parse, or belong to other years, are ignored.
pub fn next_sequence_in_year<'a, I>(year: i32, existing: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let count = existing
        .into_iter()
        .filter_map(parse_quote_number)
        .filter(|(y, _)| *y == year)
        .count();
    count as u32 + 1
}
