//! Roof slope classification.
//!
//! One canonical enum. Business-facing names are capitalized ("Flat"), the
//! pricing config keys are lowercase ("flat"); [`SlopeType::parse`] is the
//! single normalization step between them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SlopeType {
    Flat,
    Shallow,
    Medium,
    Steep,
}

impl SlopeType {
    pub fn all() -> &'static [SlopeType] {
        &[SlopeType::Flat, SlopeType::Shallow, SlopeType::Medium, SlopeType::Steep]
    }

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            SlopeType::Flat => "Flat",
            SlopeType::Shallow => "Shallow",
            SlopeType::Medium => "Medium",
            SlopeType::Steep => "Steep",
        }
    }

    /// Lowercase key used in pricing config files.
    pub fn key(&self) -> &'static str {
        match self {
            SlopeType::Flat => "flat",
            SlopeType::Shallow => "shallow",
            SlopeType::Medium => "medium",
            SlopeType::Steep => "steep",
        }
    }

    /// Case-insensitive, whitespace-tolerant lookup. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<SlopeType> {
        match name.trim().to_lowercase().as_str() {
            "flat" => Some(SlopeType::Flat),
            "shallow" => Some(SlopeType::Shallow),
            "medium" => Some(SlopeType::Medium),
            "steep" => Some(SlopeType::Steep),
            _ => None,
        }
    }
}

impl fmt::Display for SlopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SlopeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        SlopeType::parse(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown slope type: {}", name)))
    }
}

/// Deserialize an optional slope, mapping unrecognized names to `None`.
///
/// Use with `#[serde(default, deserialize_with = "lenient")]` so a bad slope
/// in one roof record prices at the default multiplier instead of rejecting
/// the whole document.
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SlopeType>, D::Error> {
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.and_then(|n| {
        let slope = SlopeType::parse(&n);
        if slope.is_none() {
            tracing::warn!(slope = %n, "unrecognized slope, treating as unknown");
        }
        slope
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(SlopeType::parse("Flat"), Some(SlopeType::Flat));
        assert_eq!(SlopeType::parse("steep"), Some(SlopeType::Steep));
        assert_eq!(SlopeType::parse("  MEDIUM "), Some(SlopeType::Medium));
        assert_eq!(SlopeType::parse("unknown"), None);
        assert_eq!(SlopeType::parse(""), None);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for slope in SlopeType::all() {
            assert_eq!(SlopeType::parse(slope.name()), Some(*slope));
            assert_eq!(SlopeType::parse(slope.key()), Some(*slope));
        }
    }

    #[test]
    fn serializes_canonical_name() {
        assert_eq!(serde_json::to_string(&SlopeType::Shallow).unwrap(), "\"Shallow\"");
        let slope: SlopeType = serde_json::from_str("\"shallow\"").unwrap();
        assert_eq!(slope, SlopeType::Shallow);
        assert!(serde_json::from_str::<SlopeType>("\"vertical\"").is_err());
    }

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "lenient")]
        slope: Option<SlopeType>,
    }

    #[test]
    fn lenient_maps_unknown_to_none() {
        let r: Record = serde_json::from_str(r#"{"slope": "vertical"}"#).unwrap();
        assert_eq!(r.slope, None);
        let r: Record = serde_json::from_str(r#"{"slope": "STEEP"}"#).unwrap();
        assert_eq!(r.slope, Some(SlopeType::Steep));
        let r: Record = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(r.slope, None);
        let r: Record = serde_json::from_str(r#"{"slope": null}"#).unwrap();
        assert_eq!(r.slope, None);
    }
}
