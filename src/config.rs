//! Configuration for radius query planning
//!
//! Plain, serializable settings that can be loaded from JSON or (with the
//! `toml` feature) TOML files.
use crate::compute::ranges::PrecisionPolicy;
use crate::compute::validation::validate_precision;
use crate::error::{GeoRangeError, Result};
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How strictly query inputs are checked before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Reject non-finite or out-of-range coordinates and negative radii.
    #[default]
    Strict,
    /// Accept anything. Out-of-range input degrades to coarse or meaningless
    /// ranges instead of failing.
    Permissive,
}

/// Planner configuration
///
/// # Example
///
/// ```rust
/// use georange::{Config, ValidationMode};
///
/// // Create default config
/// let config = Config::default();
/// assert_eq!(config.full_bits, 64);
///
/// // Load from JSON
/// let json = r#"{
///     "full_bits": 52,
///     "validation": "permissive",
///     "precision": "equatorial"
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.validation, ValidationMode::Permissive);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Precision of the stored keys (even, 2-64, default: 64)
    #[serde(default = "Config::default_full_bits")]
    pub full_bits: u32,

    /// Input checking policy
    #[serde(default)]
    pub validation: ValidationMode,

    /// How the search precision is derived from the radius
    #[serde(default)]
    pub precision: PrecisionPolicy,

    /// Optional upper bound on the radius, enforced in strict mode
    #[serde(default)]
    pub max_radius_km: Option<f64>,
}

impl Config {
    const fn default_full_bits() -> u32 {
        64
    }

    pub fn with_full_bits(mut self, bits: u32) -> Self {
        self.full_bits = bits;
        self
    }

    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    pub fn with_precision_policy(mut self, policy: PrecisionPolicy) -> Self {
        self.precision = policy;
        self
    }

    pub fn with_max_radius_km(mut self, max_radius_km: f64) -> Self {
        self.max_radius_km = Some(max_radius_km);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_precision(self.full_bits)?;

        if let Some(max) = self.max_radius_km
            && !(max.is_finite() && max > 0.0)
        {
            return Err(GeoRangeError::Config(format!(
                "max_radius_km must be positive and finite, got: {}",
                max
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a file, picking the format from its extension.
    ///
    /// `.json` is always supported; `.toml` needs the `toml` feature.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("json") => Self::from_json(&contents).map_err(|e| GeoRangeError::Config(e.to_string()))?,
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents).map_err(|e| GeoRangeError::Config(e.to_string()))?,
            _ => {
                return Err(GeoRangeError::Config(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )));
            }
        };
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            full_bits: Self::default_full_bits(),
            validation: ValidationMode::default(),
            precision: PrecisionPolicy::default(),
            max_radius_km: None,
        }
    }
}
