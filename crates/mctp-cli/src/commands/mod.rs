pub mod generate;
pub mod scales;
pub mod validate;

use mctp_core::config::DEFAULT_BOOTSTRAP_RESAMPLES;
use mctp_core::{AcceptanceCriterion, ThresholdMode, UncertaintyMode};

/// Parse a threshold mode string into the default cut-offs for that mode.
pub fn parse_threshold(s: &str) -> Result<ThresholdMode, String> {
    match s {
        "fixed" => Ok(ThresholdMode::fixed()),
        "percentile" => Ok(ThresholdMode::percentile()),
        _ => Err(format!("unknown threshold mode '{s}' (expected fixed or percentile)")),
    }
}

/// Parse an uncertainty mode string. `resamples` overrides the bootstrap count.
pub fn parse_uncertainty(s: &str, resamples: Option<usize>) -> Result<UncertaintyMode, String> {
    match s {
        "none" => Ok(UncertaintyMode::None),
        "bootstrap" => Ok(UncertaintyMode::Bootstrap {
            resamples: resamples.unwrap_or(DEFAULT_BOOTSTRAP_RESAMPLES),
        }),
        _ => Err(format!("unknown uncertainty mode '{s}' (expected none or bootstrap)")),
    }
}

/// Parse an acceptance criterion string.
pub fn parse_acceptance(s: &str) -> Result<AcceptanceCriterion, String> {
    match s {
        "fixed" => Ok(AcceptanceCriterion::FixedTolerance),
        "propagated" => Ok(AcceptanceCriterion::PropagatedUncertainty),
        _ => Err(format!("unknown acceptance criterion '{s}' (expected fixed or propagated)")),
    }
}
