//! Plain-text validation report.

use crate::validator::{DomainPrediction, ValidationResult};

/// Returned when no validation has run yet.
pub const NO_RESULTS: &str = "No validation results available. Run validate first.";

fn fmt_opt(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| "n/a".to_string())
}

fn domain_section(report: &mut String, title: &str, d: &DomainPrediction) {
    report.push_str(&format!("{title}\n{}\n", "-".repeat(title.chars().count())));
    report.push_str(&format!(
        "Predicted Correlation: {:.3} ± {}\n",
        d.predicted_correlation,
        fmt_opt(d.predicted_uncertainty, |u| format!("{u:.3}"))
    ));
    report.push_str(&format!("Observed Correlation: {:.3}\n", d.observed_correlation));
    report.push_str(&format!("Tolerance: {:.3}\n", d.tolerance));
    report.push_str(&format!("Within Tolerance: {}\n\n", d.accepted));
}

/// Render a fixed-layout report. `None` yields [`NO_RESULTS`].
pub fn render_report(result: Option<&ValidationResult>) -> String {
    let Some(r) = result else {
        return NO_RESULTS.to_string();
    };
    let q = &r.quantum;

    let mut report = String::new();
    report.push_str("MCTP Cross-Domain Validation Report\n");
    report.push_str(&format!("{}\n\n", "=".repeat(35)));

    report.push_str("Quantum Domain:\n---------------\n");
    report.push_str(&format!(
        "C_U Estimated: {:.3e} ± {}\n",
        q.c_u,
        fmt_opt(q.c_u_uncertainty, |u| format!("{u:.3e}"))
    ));
    report.push_str(&format!(
        "Correlation: {:.3} ± {}\n",
        q.correlation,
        fmt_opt(q.correlation_uncertainty, |u| format!("{u:.3}"))
    ));
    report.push_str(&format!("p-value: {:.3e}\n", q.p_value));
    report.push_str(&format!("Coherence Enhancement: {:.2}x\n", q.enhancement));
    report.push_str(&format!(
        "Samples: {} (high symmetry: {}, low symmetry: {})\n\n",
        q.n_samples, q.high_count, q.low_count
    ));

    domain_section(&mut report, "Neural Domain:", &r.neural);
    domain_section(&mut report, "Cosmic Domain:", &r.cosmic);

    report.push_str(&format!(
        "Overall Validation: {}\n",
        if r.success { "SUCCESS" } else { "FAILED" }
    ));
    report
}
