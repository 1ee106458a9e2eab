//! Cross-domain validation of MCTP predictions.
//!
//! Pipeline: estimate C_U from quantum data only, project it into predicted
//! neural and cosmic correlations, compare each prediction with the observed
//! value.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{
    AcceptanceCriterion, AffineModel, CalibrationModel, ThresholdMode, UncertaintyMode,
    ValidatorConfig,
};
use crate::data::{DomainObservation, QuantumBundle};
use crate::error::ValidationError;
use crate::report::render_report;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// C_U estimate and the statistics it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantumEstimate {
    /// `(enhancement - 1)^2`, always >= 0.
    pub c_u: f64,
    /// `correlation_uncertainty * c_u` when bootstrapped.
    pub c_u_uncertainty: Option<f64>,
    /// Pearson r between symmetry score and coherence time.
    pub correlation: f64,
    /// Standard deviation of bootstrapped r.
    pub correlation_uncertainty: Option<f64>,
    pub p_value: f64,
    /// Mean coherence of the high-symmetry subset over the low-symmetry subset.
    pub enhancement: f64,
    pub n_samples: usize,
    /// Bootstrap resamples that produced a defined r.
    pub bootstrap_samples: Option<usize>,
    pub high_count: usize,
    pub low_count: usize,
}

/// Prediction vs observation for one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainPrediction {
    pub predicted_correlation: f64,
    pub predicted_uncertainty: Option<f64>,
    pub observed_correlation: f64,
    /// Tolerance that was actually applied.
    pub tolerance: f64,
    pub accepted: bool,
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub quantum: QuantumEstimate,
    pub neural: DomainPrediction,
    pub cosmic: DomainPrediction,
    /// Both domains accepted.
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Step A: quantum estimation
// ---------------------------------------------------------------------------

/// Enhancement ratio from the high/low symmetry split.
///
/// Returns `(enhancement, high_count, low_count)`. An empty subset yields the
/// neutral enhancement of exactly 1.0.
pub fn symmetry_enhancement(
    bundle: &QuantumBundle,
    threshold: ThresholdMode,
) -> (f64, usize, usize) {
    let scores = &bundle.symmetry_scores;
    let (high_cut, low_cut) = match threshold {
        ThresholdMode::Fixed { high, low } => (high, low),
        ThresholdMode::Percentile { high, low } => (
            mctp_stats::percentile(scores, high),
            mctp_stats::percentile(scores, low),
        ),
    };

    let mut high = Vec::new();
    let mut low = Vec::new();
    for (&s, &t) in scores.iter().zip(&bundle.coherence_times) {
        if s > high_cut {
            high.push(t);
        }
        if s < low_cut {
            low.push(t);
        }
    }

    if high.is_empty() || low.is_empty() {
        log::warn!(
            "insufficient samples for high/low symmetry comparison (high={}, low={}); using enhancement = 1.0",
            high.len(),
            low.len()
        );
        return (1.0, high.len(), low.len());
    }
    let enhancement = mctp_stats::mean(&high) / mctp_stats::mean(&low);
    (enhancement, high.len(), low.len())
}

/// Estimate C_U from quantum processor data.
///
/// With [`UncertaintyMode::Bootstrap`] the correlation's standard error is
/// carried into C_U multiplicatively (`sd(r) * C_U`). That is a heuristic
/// scaling, not a delta-method propagation.
pub fn estimate_quantum(
    bundle: &QuantumBundle,
    config: &ValidatorConfig,
    rng: &mut impl Rng,
) -> Result<QuantumEstimate, ValidationError> {
    let n = bundle.symmetry_scores.len();
    if n != bundle.coherence_times.len() {
        return Err(ValidationError::LengthMismatch {
            symmetry: n,
            coherence: bundle.coherence_times.len(),
        });
    }
    if n == 0 {
        return Err(ValidationError::EmptySample);
    }

    let corr = mctp_stats::pearson_test(&bundle.symmetry_scores, &bundle.coherence_times);
    if !corr.defined {
        log::warn!("correlation undefined for {n} samples (zero variance); reporting r = 0, p = 1");
    }

    let (enhancement, high_count, low_count) = symmetry_enhancement(bundle, config.threshold);
    let c_u = (enhancement - 1.0).powi(2);

    let (correlation_uncertainty, bootstrap_samples) = match config.uncertainty {
        UncertaintyMode::None => (None, None),
        UncertaintyMode::Bootstrap { resamples } => {
            let rs = mctp_stats::bootstrap_correlations(
                &bundle.symmetry_scores,
                &bundle.coherence_times,
                resamples,
                rng,
            );
            log::debug!("bootstrap: {}/{} usable resamples", rs.len(), resamples);
            if rs.is_empty() {
                log::warn!("no bootstrap resample produced a defined correlation");
                (None, Some(0))
            } else {
                (Some(mctp_stats::std_dev(&rs)), Some(rs.len()))
            }
        }
    };

    Ok(QuantumEstimate {
        c_u,
        c_u_uncertainty: correlation_uncertainty.map(|u| u * c_u),
        correlation: corr.r,
        correlation_uncertainty,
        p_value: corr.p_value,
        enhancement,
        n_samples: n,
        bootstrap_samples,
        high_count,
        low_count,
    })
}

// ---------------------------------------------------------------------------
// Steps B and C: prediction and comparison
// ---------------------------------------------------------------------------

/// Project C_U through one affine model. Uncertainty scales with the slope.
pub fn predict(
    c_u: f64,
    c_u_uncertainty: Option<f64>,
    model: &AffineModel,
) -> (f64, Option<f64>) {
    (
        model.apply(c_u),
        c_u_uncertainty.map(|u| model.slope.abs() * u),
    )
}

/// `|observed - predicted| <= tolerance`.
pub fn within_tolerance(observed: f64, predicted: f64, tolerance: f64) -> bool {
    (observed - predicted).abs() <= tolerance
}

fn compare(
    estimate: &QuantumEstimate,
    model: &AffineModel,
    observation: &DomainObservation,
    config: &ValidatorConfig,
) -> DomainPrediction {
    let (predicted, uncertainty) = predict(estimate.c_u, estimate.c_u_uncertainty, model);
    let tolerance = match (config.acceptance, uncertainty) {
        (AcceptanceCriterion::PropagatedUncertainty, Some(u)) => u,
        _ => config.tolerance,
    };
    DomainPrediction {
        predicted_correlation: predicted,
        predicted_uncertainty: uncertainty,
        observed_correlation: observation.correlation,
        tolerance,
        accepted: within_tolerance(observation.correlation, predicted, tolerance),
    }
}

/// Predict and compare both domains from a finished quantum estimate.
pub fn validate_estimate(
    quantum: QuantumEstimate,
    neural: &DomainObservation,
    cosmic: &DomainObservation,
    config: &ValidatorConfig,
) -> ValidationResult {
    let CalibrationModel {
        neural: neural_model,
        cosmic: cosmic_model,
    } = config.model;
    let neural = compare(&quantum, &neural_model, neural, config);
    let cosmic = compare(&quantum, &cosmic_model, cosmic, config);
    let success = neural.accepted && cosmic.accepted;
    ValidationResult {
        quantum,
        neural,
        cosmic,
        success,
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Runs the full pipeline with its own seeded RNG and remembers the last result.
pub struct Validator {
    config: ValidatorConfig,
    rng: StdRng,
    last: Option<ValidationResult>,
}

impl Validator {
    /// RNG seeded from `config.seed`.
    pub fn new(config: ValidatorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: ValidatorConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            last: None,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Estimate C_U, predict both domains, compare against observations.
    pub fn validate(
        &mut self,
        quantum: &QuantumBundle,
        neural: &DomainObservation,
        cosmic: &DomainObservation,
    ) -> Result<ValidationResult, ValidationError> {
        let estimate = estimate_quantum(quantum, &self.config, &mut self.rng)?;
        log::info!(
            "C_U = {:.3e} (enhancement {:.4}, r = {:.3}, n = {})",
            estimate.c_u,
            estimate.enhancement,
            estimate.correlation,
            estimate.n_samples
        );
        let result = validate_estimate(estimate, neural, cosmic, &self.config);
        self.last = Some(result.clone());
        Ok(result)
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last.as_ref()
    }

    /// Report for the most recent run, or a placeholder if there was none.
    pub fn report(&self) -> String {
        render_report(self.last.as_ref())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;

    fn observation(correlation: f64) -> DomainObservation {
        DomainObservation {
            correlation,
            uncertainty: None,
            description: String::new(),
        }
    }

    fn bootstrap_config(resamples: usize) -> ValidatorConfig {
        ValidatorConfig {
            uncertainty: UncertaintyMode::Bootstrap { resamples },
            ..ValidatorConfig::full()
        }
    }

    #[test]
    fn length_mismatch_fails_fast() {
        let bundle = QuantumBundle::new(vec![0.5, 0.6, 0.7], vec![150.0, 160.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = estimate_quantum(&bundle, &ValidatorConfig::simple(), &mut rng).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                symmetry: 3,
                coherence: 2
            }
        );
        assert!(err.to_string().contains("same length"));
    }

    #[test]
    fn empty_bundle_is_an_error() {
        let bundle = QuantumBundle::new(vec![], vec![]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            estimate_quantum(&bundle, &ValidatorConfig::simple(), &mut rng),
            Err(ValidationError::EmptySample)
        );
    }

    #[test]
    fn fixed_thresholds_on_fallback_leave_low_subset_empty() {
        let (e, high, low) =
            symmetry_enhancement(&QuantumBundle::fallback(), ThresholdMode::fixed());
        assert_eq!(e, 1.0);
        assert_eq!(high, 6);
        assert_eq!(low, 0);
    }

    #[test]
    fn fixed_thresholds_split_strictly() {
        let bundle = QuantumBundle::new(
            vec![0.2, 0.3, 0.5, 0.7, 0.8],
            vec![100.0, 999.0, 999.0, 999.0, 120.0],
        );
        let (e, high, low) = symmetry_enhancement(&bundle, ThresholdMode::fixed());
        assert_eq!((high, low), (1, 1));
        assert!((e - 1.2).abs() < 1e-12);
    }

    #[test]
    fn percentile_thresholds_on_fallback() {
        let (e, high, low) =
            symmetry_enhancement(&QuantumBundle::fallback(), ThresholdMode::percentile());
        assert_eq!((high, low), (3, 3));
        let expected = ((174.9 + 173.2 + 178.3) / 3.0) / ((176.8 + 148.5 + 169.8) / 3.0);
        assert!((e - expected).abs() < 1e-12);
    }

    #[test]
    fn c_u_is_squared_excess_enhancement() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = ValidatorConfig {
            threshold: ThresholdMode::percentile(),
            ..ValidatorConfig::simple()
        };
        let est = estimate_quantum(&QuantumBundle::fallback(), &config, &mut rng).unwrap();
        assert!((est.c_u - (est.enhancement - 1.0).powi(2)).abs() < 1e-15);
        assert!((est.c_u - 0.003_996_711_7).abs() < 1e-9);
        assert_eq!(est.c_u_uncertainty, None);
        assert_eq!(est.bootstrap_samples, None);
        assert!(est.correlation > 0.9);
    }

    #[test]
    fn c_u_non_negative_when_enhancement_below_one() {
        // high-symmetry processors are the slow ones here
        let bundle = QuantumBundle::new(vec![0.1, 0.2, 0.8, 0.9], vec![200.0, 190.0, 100.0, 110.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let est = estimate_quantum(&bundle, &ValidatorConfig::simple(), &mut rng).unwrap();
        assert!(est.enhancement < 1.0);
        assert!(est.c_u > 0.0);
        assert!(est.correlation < 0.0);
    }

    #[test]
    fn all_high_scores_give_neutral_enhancement() {
        let bundle =
            QuantumBundle::new(vec![0.8, 0.85, 0.9, 0.95], vec![150.0, 160.0, 170.0, 180.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let est = estimate_quantum(&bundle, &ValidatorConfig::simple(), &mut rng).unwrap();
        assert_eq!(est.enhancement, 1.0);
        assert_eq!(est.c_u, 0.0);
        assert_eq!(est.low_count, 0);
    }

    #[test]
    fn identical_scores_give_neutral_percentile_split() {
        let times = vec![150.0, 151.0, 152.0, 153.0, 154.0, 155.0];
        let bundle = QuantumBundle::new(vec![0.5; 6], times);
        let mut rng = StdRng::seed_from_u64(0);
        let config = bootstrap_config(200);
        let est = estimate_quantum(&bundle, &config, &mut rng).unwrap();
        assert_eq!(est.enhancement, 1.0);
        assert_eq!(est.c_u, 0.0);
        // constant scores: r undefined everywhere
        assert_eq!(est.correlation, 0.0);
        assert_eq!(est.p_value, 1.0);
        assert_eq!(est.correlation_uncertainty, None);
        assert_eq!(est.bootstrap_samples, Some(0));
    }

    #[test]
    fn inexact_constant_sample_reports_undefined_correlation() {
        let bundle = QuantumBundle::new(vec![0.72; 8], vec![172.3; 8]);
        let config = ValidatorConfig {
            uncertainty: UncertaintyMode::Bootstrap { resamples: 200 },
            ..ValidatorConfig::simple()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let est = estimate_quantum(&bundle, &config, &mut rng).unwrap();
        assert_eq!(est.correlation, 0.0);
        assert_eq!(est.p_value, 1.0);
        assert_eq!(est.correlation_uncertainty, None);
        assert_eq!(est.bootstrap_samples, Some(0));

        let times = vec![176.8, 148.5, 172.3, 174.9, 173.2, 169.8, 175.1, 178.3, 170.0, 171.0];
        let bundle = QuantumBundle::new(vec![0.77; 10], times);
        let est = estimate_quantum(&bundle, &ValidatorConfig::simple(), &mut rng).unwrap();
        assert_eq!(est.correlation, 0.0);
        assert_eq!(est.p_value, 1.0);
    }

    #[test]
    fn small_bundle_bootstrap_drops_constant_resamples() {
        // 3 points: about 1 in 9 resamples repeats a single index
        let bundle = QuantumBundle::new(vec![0.71, 0.56, 0.72], vec![176.8, 148.5, 172.3]);
        let mut rng = StdRng::seed_from_u64(5);
        let est = estimate_quantum(&bundle, &bootstrap_config(2_000), &mut rng).unwrap();
        let kept = est.bootstrap_samples.unwrap();
        assert!(kept < 2_000, "kept {kept}");
        assert!(kept > 1_500, "kept {kept}");
        let sd = est.correlation_uncertainty.unwrap();
        assert!(sd.is_finite() && sd > 0.0);
    }

    #[test]
    fn single_sample_is_degenerate_not_an_error() {
        let bundle = QuantumBundle::new(vec![0.8], vec![170.0]);
        let mut rng = StdRng::seed_from_u64(0);
        let est = estimate_quantum(&bundle, &ValidatorConfig::simple(), &mut rng).unwrap();
        assert_eq!(est.n_samples, 1);
        assert_eq!(est.c_u, 0.0);
        assert_eq!(est.p_value, 1.0);
    }

    #[test]
    fn bootstrap_is_reproducible_under_seed() {
        let config = bootstrap_config(2_000);
        let bundle = QuantumBundle::fallback();
        let a = estimate_quantum(&bundle, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = estimate_quantum(&bundle, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        let u = a.correlation_uncertainty.unwrap();
        assert!(u > 0.0 && u < 0.5, "sd(r) = {u}");
        assert!((a.c_u_uncertainty.unwrap() - u * a.c_u).abs() < 1e-15);
        assert!(a.bootstrap_samples.unwrap() <= 2_000);
    }

    #[test]
    fn prediction_formulas() {
        let model = CalibrationModel::default();
        let (n, nu) = predict(0.02, Some(0.001), &model.neural);
        assert!((n - 0.40).abs() < 1e-12);
        assert!((nu.unwrap() - 0.005).abs() < 1e-12);
        let (c, cu) = predict(0.02, None, &model.cosmic);
        assert!((c - 0.34).abs() < 1e-12);
        assert_eq!(cu, None);
    }

    #[test]
    fn fallback_scenario_fixed_tolerance() {
        let loader = DataLoader::default();
        let mut v = Validator::new(ValidatorConfig::simple());
        let r = v
            .validate(
                &QuantumBundle::fallback(),
                &loader.load_neural_observation(),
                &loader.load_cosmic_observation(),
            )
            .unwrap();
        assert_eq!(r.quantum.enhancement, 1.0);
        assert_eq!(r.quantum.c_u, 0.0);
        assert_eq!(r.neural.predicted_correlation, 0.30);
        assert_eq!(r.cosmic.predicted_correlation, 0.25);
        assert_eq!(r.neural.tolerance, 0.1);
        assert!(r.neural.accepted);
        assert!(r.cosmic.accepted);
        assert!(r.success);
        assert_eq!(v.last_result(), Some(&r));
    }

    #[test]
    fn fallback_scenario_percentile_split() {
        let config = ValidatorConfig {
            threshold: ThresholdMode::percentile(),
            ..ValidatorConfig::simple()
        };
        let mut v = Validator::new(config);
        let r = v
            .validate(&QuantumBundle::fallback(), &observation(0.39), &observation(0.34))
            .unwrap();
        assert!((r.neural.predicted_correlation - 0.319_983_558_5).abs() < 1e-9);
        assert!((r.cosmic.predicted_correlation - 0.267_985_202_7).abs() < 1e-9);
        assert!(r.success);
    }

    #[test]
    fn propagated_tolerance_is_much_tighter() {
        let mut config = ValidatorConfig::full();
        config.uncertainty = UncertaintyMode::Bootstrap { resamples: 1_000 };
        let mut v = Validator::new(config);
        let r = v
            .validate(&QuantumBundle::fallback(), &observation(0.39), &observation(0.34))
            .unwrap();
        let nu = r.neural.predicted_uncertainty.unwrap();
        assert_eq!(r.neural.tolerance, nu);
        assert!(nu < 0.01);
        assert!(!r.neural.accepted);
        assert!(!r.cosmic.accepted);
        assert!(!r.success);
    }

    #[test]
    fn propagated_without_uncertainty_falls_back_to_fixed() {
        let config = ValidatorConfig {
            acceptance: AcceptanceCriterion::PropagatedUncertainty,
            ..ValidatorConfig::simple()
        };
        let mut v = Validator::new(config);
        let r = v
            .validate(&QuantumBundle::fallback(), &observation(0.39), &observation(0.34))
            .unwrap();
        assert_eq!(r.neural.predicted_uncertainty, None);
        assert_eq!(r.neural.tolerance, 0.1);
        assert!(r.success);
    }

    #[test]
    fn domains_are_independent() {
        let bundle = QuantumBundle::fallback();
        let mut v = Validator::default();
        let a = v.validate(&bundle, &observation(0.39), &observation(0.90)).unwrap();
        assert!(a.neural.accepted);
        assert!(!a.cosmic.accepted);
        assert!(!a.success);

        let mut v = Validator::default();
        let b = v.validate(&bundle, &observation(0.90), &observation(0.34)).unwrap();
        assert!(!b.neural.accepted);
        assert!(b.cosmic.accepted);
        assert_eq!(a.neural.predicted_correlation, b.neural.predicted_correlation);
        assert_eq!(a.cosmic.predicted_correlation, b.cosmic.predicted_correlation);
    }

    #[test]
    fn acceptance_monotonic_in_tolerance() {
        let pairs = [(0.39, 0.30), (0.10, 0.25), (0.25, 0.25), (-0.2, 0.3)];
        for (observed, predicted) in pairs {
            let mut was_accepted = false;
            for step in 0..=100 {
                let tol = step as f64 * 0.01;
                let ok = within_tolerance(observed, predicted, tol);
                assert!(ok || !was_accepted, "flipped back at tol={tol}");
                was_accepted = ok;
            }
            assert!(was_accepted);
        }
    }

    #[test]
    fn custom_calibration_model_is_used() {
        let mut config = ValidatorConfig::simple();
        config.model.neural = AffineModel {
            intercept: 0.0,
            slope: 1.0,
        };
        config.tolerance = 0.05;
        let mut v = Validator::new(config);
        let r = v
            .validate(&QuantumBundle::fallback(), &observation(0.39), &observation(0.34))
            .unwrap();
        assert_eq!(r.neural.predicted_correlation, 0.0);
        assert!(!r.neural.accepted);
        assert!(!r.cosmic.accepted);
    }
}
