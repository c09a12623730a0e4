//! Pricing configuration loaded from YAML.
//!
//! ```yaml
//! multipliers:
//!   flat: 0.4
//!   shallow: 0.6
//!   medium: 0.8
//!   steep: 1.0
//! default_multiplier: 0.7
//! material_cost_per_unit: 4.25
//! currency: "$"
//! ```
//!
//! Every field is optional; missing multipliers keep their default value.
//! Slope keys are matched case-insensitively, so `Steep` and `steep` name
//! the same multiplier and may not both appear. Unknown fields are errors.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::pricing::{DEFAULT_MULTIPLIER, PricingTable};
use crate::slope::SlopeType;

/// Environment variable naming a config file when none is passed explicitly.
pub const CONFIG_ENV_VAR: &str = "ROOF_QUOTE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Overrides keyed by slope name.
    #[serde(default)]
    pub multipliers: BTreeMap<String, f64>,

    #[serde(default = "default_multiplier")]
    pub default_multiplier: f64,

    /// Fallback cost per square foot when the caller supplies none.
    #[serde(default)]
    pub material_cost_per_unit: Option<f64>,

    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_multiplier() -> f64 {
    DEFAULT_MULTIPLIER
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            multipliers: BTreeMap::new(),
            default_multiplier: DEFAULT_MULTIPLIER,
            material_cost_per_unit: None,
            currency: default_currency(),
        }
    }
}

impl PricingConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: PricingConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| QuoteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), "loaded pricing config");
        Ok(config)
    }

    /// Load from `path`, else from `$ROOF_QUOTE_CONFIG`, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(p) if !p.is_empty() => Self::load(Path::new(&p)),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for (key, value) in &self.multipliers {
            // let-else: bind on success, bail out otherwise
            let Some(slope) = SlopeType::parse(key) else {
                return Err(QuoteError::InvalidConfig(format!(
                    "unknown slope '{}' (expected flat, shallow, medium or steep)",
                    key
                )));
            };
            if !seen.insert(slope) {
                return Err(QuoteError::InvalidConfig(format!(
                    "multiplier for {} given more than once",
                    slope.key()
                )));
            }
            check_non_negative(&format!("multipliers.{}", key), *value)?;
        }
        check_non_negative("default_multiplier", self.default_multiplier)?;
        if let Some(cost) = self.material_cost_per_unit {
            check_non_negative("material_cost_per_unit", cost)?;
        }
        Ok(())
    }

    /// Default table with this config's overrides applied.
    pub fn table(&self) -> PricingTable {
        let mut table = PricingTable {
            default: self.default_multiplier,
            ..PricingTable::default()
        };
        for (key, value) in &self.multipliers {
            match SlopeType::parse(key) {
                Some(SlopeType::Flat) => table.flat = *value,
                Some(SlopeType::Shallow) => table.shallow = *value,
                Some(SlopeType::Medium) => table.medium = *value,
                Some(SlopeType::Steep) => table.steep = *value,
                None => {}
            }
        }
        table
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuoteError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}
