//! Small-sample statistics for MCTP cross-domain validation.
//!
//! Everything here works on plain `f64` slices of a few dozen points at most:
//! descriptive statistics, a Pearson correlation with its two-sided t-test
//! p-value, numpy-style linear percentiles and a seeded bootstrap of the
//! correlation coefficient.

use rand::Rng;
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::cmp::Ordering;
use std::f64::consts::PI;

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Pearson correlation between two paired samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationTest {
    /// Correlation coefficient in [-1, 1]. Zero when undefined.
    pub r: f64,
    /// Two-sided p-value under the null of zero correlation.
    pub p_value: f64,
    /// Number of pairs used.
    pub n: usize,
    /// False when either sample had zero variance (or fewer than 2 pairs).
    pub defined: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Descriptive statistics
// ═══════════════════════════════════════════════════════════════════════════════

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation (divides by `n`, like `numpy.std`).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let center = mean(values);
    let var = values
        .iter()
        .map(|v| (v - center) * (v - center))
        .sum::<f64>()
        / values.len() as f64;
    var.sqrt()
}

/// Percentile `p` (0–100) with linear interpolation between closest ranks.
///
/// Matches numpy's default `linear` method: the rank is `p/100 * (n - 1)`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let q = (p / 100.0).clamp(0.0, 1.0);
    let idx = q * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let t = idx - lo as f64;
        sorted[lo] * (1.0 - t) + sorted[hi] * t
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Correlation
// ═══════════════════════════════════════════════════════════════════════════════

/// Pearson correlation coefficient over the first `min(x.len(), y.len())` pairs.
///
/// Returns `None` when fewer than two pairs are available or either sample has
/// zero variance. A constant sample is detected by exact comparison: the mean of
/// a repeated inexact value like 0.72 leaves rounding residue in the deviations,
/// which would otherwise come out as r = ±1.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return None;
    }
    let mx = mean(&x[..n]);
    let my = mean(&y[..n]);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let den = (sxx * syy).sqrt();
    if den <= 1e-300 || !den.is_finite() {
        None
    } else {
        Some((sxy / den).clamp(-1.0, 1.0))
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Two-sided p-value for a sample correlation `r` over `n` pairs.
///
/// Uses `t = r * sqrt((n - 2) / (1 - r^2))`, Student's t with `n - 2` degrees of
/// freedom. Fewer than three pairs carry no evidence (p = 1); a perfect
/// correlation gives p = 0.
pub fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n < 3 || !r.is_finite() {
        return 1.0;
    }
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return 0.0;
    }
    let dof = (n - 2) as f64;
    let t = r * (dof / one_minus_r2).sqrt();
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

/// Pearson correlation plus its two-sided t-test p-value.
///
/// An undefined correlation is reported as `r = 0`, `p = 1`, `defined = false`.
pub fn pearson_test(x: &[f64], y: &[f64]) -> CorrelationTest {
    let n = x.len().min(y.len());
    match pearson(x, y) {
        Some(r) => CorrelationTest {
            r,
            p_value: correlation_p_value(r, n),
            n,
            defined: true,
        },
        None => CorrelationTest {
            r: 0.0,
            p_value: 1.0,
            n,
            defined: false,
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Resampling
// ═══════════════════════════════════════════════════════════════════════════════

/// Bootstrap distribution of the Pearson correlation.
///
/// Draws `resamples` index sets of size `n` with replacement and recomputes r
/// on each. Resamples where r is undefined (all draws hit tied values) are
/// dropped, so the returned vector can be shorter than `resamples`.
pub fn bootstrap_correlations(
    x: &[f64],
    y: &[f64],
    resamples: usize,
    rng: &mut impl Rng,
) -> Vec<f64> {
    let n = x.len().min(y.len());
    if n == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(resamples);
    let mut xs = vec![0.0; n];
    let mut ys = vec![0.0; n];
    let mut skipped = 0usize;
    for _ in 0..resamples {
        for i in 0..n {
            let j = rng.random_range(0..n);
            xs[i] = x[j];
            ys[i] = y[j];
        }
        match pearson(&xs, &ys) {
            Some(r) => out.push(r),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::debug!("bootstrap: skipped {skipped}/{resamples} resamples with undefined r");
    }
    out
}

/// Standard normal draw via Box–Muller.
pub fn sample_standard_normal(rng: &mut impl Rng) -> f64 {
    let u1 = rng.random::<f64>().clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Normal draw with the given mean and standard deviation.
pub fn sample_normal(rng: &mut impl Rng, mean: f64, std: f64) -> f64 {
    if std <= 0.0 {
        return mean;
    }
    mean + std * sample_standard_normal(rng)
}
