//! Validator configuration.
//!
//! The estimator used to exist in two near-identical flavours: a simplified one
//! (fixed 0.7/0.3 thresholds, no uncertainty, fixed 0.1 tolerance) and a full
//! one (percentile thresholds, bootstrap uncertainty, propagated tolerance).
//! Both are now a single [`ValidatorConfig`] with mode switches; see
//! [`ValidatorConfig::simple`] and [`ValidatorConfig::full`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Default number of bootstrap resamples.
pub const DEFAULT_BOOTSTRAP_RESAMPLES: usize = 10_000;
/// Default absolute acceptance tolerance.
pub const DEFAULT_TOLERANCE: f64 = 0.1;
/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// How the high/low symmetry subsets are cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Absolute score cut-offs.
    Fixed { high: f64, low: f64 },
    /// Percentiles (0–100) of the observed scores.
    Percentile { high: f64, low: f64 },
}

impl ThresholdMode {
    pub fn fixed() -> Self {
        ThresholdMode::Fixed {
            high: 0.7,
            low: 0.3,
        }
    }

    pub fn percentile() -> Self {
        ThresholdMode::Percentile {
            high: 70.0,
            low: 30.0,
        }
    }
}

impl Default for ThresholdMode {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Whether to estimate sampling uncertainty of the correlation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum UncertaintyMode {
    #[default]
    None,
    Bootstrap { resamples: usize },
}

impl UncertaintyMode {
    pub fn bootstrap() -> Self {
        UncertaintyMode::Bootstrap {
            resamples: DEFAULT_BOOTSTRAP_RESAMPLES,
        }
    }
}

/// Which tolerance decides whether a prediction is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceCriterion {
    /// `|observed - predicted| <= config.tolerance`.
    #[default]
    FixedTolerance,
    /// Tolerance is the propagated prediction uncertainty (1σ). Falls back to
    /// `config.tolerance` when no uncertainty was estimated.
    PropagatedUncertainty,
}

/// `intercept + slope * C_U`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineModel {
    pub intercept: f64,
    pub slope: f64,
}

impl AffineModel {
    pub fn apply(&self, c_u: f64) -> f64 {
        self.intercept + self.slope * c_u
    }
}

/// Calibrated cross-domain projections of C_U.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationModel {
    /// Transfer entropy vs behavioural performance.
    pub neural: AffineModel,
    /// Coherence metric vs specific star formation rate.
    pub cosmic: AffineModel,
}

impl Default for CalibrationModel {
    fn default() -> Self {
        Self {
            neural: AffineModel {
                intercept: 0.30,
                slope: 5.0,
            },
            cosmic: AffineModel {
                intercept: 0.25,
                slope: 4.5,
            },
        }
    }
}

/// Everything the validator needs besides the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub threshold: ThresholdMode,
    pub uncertainty: UncertaintyMode,
    pub acceptance: AcceptanceCriterion,
    /// Absolute tolerance for [`AcceptanceCriterion::FixedTolerance`].
    pub tolerance: f64,
    pub model: CalibrationModel,
    /// Seed for the validator-owned RNG.
    pub seed: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::simple()
    }
}

impl ValidatorConfig {
    /// Fixed thresholds, no uncertainty, fixed 0.1 tolerance.
    pub fn simple() -> Self {
        Self {
            threshold: ThresholdMode::fixed(),
            uncertainty: UncertaintyMode::None,
            acceptance: AcceptanceCriterion::FixedTolerance,
            tolerance: DEFAULT_TOLERANCE,
            model: CalibrationModel::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Percentile thresholds, 10k bootstrap resamples, 1σ propagated tolerance.
    pub fn full() -> Self {
        Self {
            threshold: ThresholdMode::percentile(),
            uncertainty: UncertaintyMode::bootstrap(),
            acceptance: AcceptanceCriterion::PropagatedUncertainty,
            ..Self::simple()
        }
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn check(&self) -> Result<(), String> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            ));
        }
        if let ThresholdMode::Percentile { high, low } = self.threshold {
            for (name, p) in [("high", high), ("low", low)] {
                if !(0.0..=100.0).contains(&p) {
                    return Err(format!("{name} percentile must be within 0..=100, got {p}"));
                }
            }
        }
        if let UncertaintyMode::Bootstrap { resamples: 0 } = self.uncertainty {
            return Err("bootstrap resamples must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Load and check a validator config from JSON. Missing fields take defaults.
pub fn load_config_from_path(path: &Path) -> Result<ValidatorConfig, DataError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str::<ValidatorConfig>(&raw).map_err(|e| DataError::Config {
        path: path.to_path_buf(),
        message: format!("failed to parse config JSON: {e}"),
    })?;
    config.check().map_err(|message| DataError::Config {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(config)
}
