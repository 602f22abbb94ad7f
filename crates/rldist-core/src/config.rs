//! Configuration for rldist-core
//!
//! Centralized settings for figure generation: default targets, marker
//! density and x-axis limits. Loadable from TOML or JSON:
//!
//! ```toml
//! nbperdecade = 1
//! single_targets = [10.0, 1e-1, 1e-4, 1e-8]
//! final_value_target = 1e-8
//! reference_target = 1e-8
//! runlen_xlimits_min = 1.0
//! xmax_exponent = 1.05
//! store_xmax = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::target::FixedTargetValues;

/// Figure generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcdfConfig {
    /// Markers per decade of the log x-axis
    pub nbperdecade: u32,
    /// Fixed targets of the run-length panel, loosest first
    pub single_targets: Vec<f64>,
    /// Precision the final gaps are divided by
    pub final_value_target: f64,
    /// The reference overlay is drawn when the tightest target equals this
    pub reference_target: f64,
    /// Left limit of the run-length panel
    pub runlen_xlimits_min: f64,
    /// Right limit of the run-length panel, overriding the computed ceiling
    pub runlen_xlimits_max: Option<f64>,
    /// The run-length panel ends at `ceiling ^ xmax_exponent`
    pub xmax_exponent: f64,
    /// Freeze the first computed x-axis ceilings for later figures
    pub store_xmax: bool,
}

impl Default for EcdfConfig {
    fn default() -> Self {
        Self {
            nbperdecade: 1,
            single_targets: vec![10.0, 1e-1, 1e-4, 1e-8],
            final_value_target: 1e-8,
            reference_target: 1e-8,
            runlen_xlimits_min: 1.0,
            runlen_xlimits_max: None,
            xmax_exponent: 1.05,
            store_xmax: false,
        }
    }
}

impl EcdfConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file, JSON for `.json` and TOML otherwise
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::from_toml(&text)?,
        };
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// The fixed targets as a target provider
    pub fn targets(&self) -> FixedTargetValues {
        FixedTargetValues::new(self.single_targets.clone())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.nbperdecade == 0 {
            return Err(ConfigError::OutOfRange(
                "nbperdecade must be positive".to_string(),
            ));
        }

        if self.single_targets.is_empty() {
            return Err(ConfigError::OutOfRange(
                "single_targets must not be empty".to_string(),
            ));
        }

        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !self.single_targets.iter().copied().all(positive) {
            return Err(ConfigError::OutOfRange(
                "single_targets must be positive".to_string(),
            ));
        }

        for (name, value) in [
            ("final_value_target", self.final_value_target),
            ("reference_target", self.reference_target),
            ("runlen_xlimits_min", self.runlen_xlimits_min),
            ("xmax_exponent", self.xmax_exponent),
        ] {
            if !positive(value) {
                return Err(ConfigError::OutOfRange(format!("{name} must be positive")));
            }
        }

        if let Some(max) = self.runlen_xlimits_max {
            if !positive(max) || max <= self.runlen_xlimits_min {
                return Err(ConfigError::OutOfRange(
                    "runlen_xlimits_max must exceed runlen_xlimits_min".to_string(),
                ));
            }
        }

        Ok(())
    }
}
