//! MCTP action principle (Maximum Coherent Information Throughput).
//!
//! Closed-form helpers around a fixed C_U: the action density, its stationary
//! point and the predicted coherence length scale per domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reduced Planck constant, J·s.
pub const HBAR: f64 = 1.054_571_817e-34;
/// Speed of light, m/s.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;
/// Gravitational constant, m³/(kg·s²).
pub const GRAVITATIONAL: f64 = 6.674_30e-11;
/// Reference value of C_U.
pub const DEFAULT_C_U: f64 = 2.18e-5;

/// The three domains the theory is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Quantum,
    Neural,
    Cosmic,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Quantum, Domain::Neural, Domain::Cosmic];

    pub fn name(self) -> &'static str {
        match self {
            Domain::Quantum => "quantum",
            Domain::Neural => "neural",
            Domain::Cosmic => "cosmic",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantum" => Ok(Domain::Quantum),
            "neural" => Ok(Domain::Neural),
            "cosmic" => Ok(Domain::Cosmic),
            other => Err(format!("unknown domain '{other}' (expected quantum, neural or cosmic)")),
        }
    }
}

/// Characteristic energy and coherence length of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainConstants {
    /// Binding/thermal energy scale E_b, joules.
    pub energy_scale_j: f64,
    /// Measured coherence length Λ_C, metres.
    pub coherence_length_m: f64,
    pub description: &'static str,
}

pub fn domain_constants(domain: Domain) -> DomainConstants {
    match domain {
        // 5 GHz qubit
        Domain::Quantum => DomainConstants {
            energy_scale_j: 3.3e-24,
            coherence_length_m: 4.2e-6,
            description: "Quantum processor coherence",
        },
        // 310 K thermal
        Domain::Neural => DomainConstants {
            energy_scale_j: 2.97e-21,
            coherence_length_m: 4.7e-6,
            description: "Neural information transfer",
        },
        // CMB thermal
        Domain::Cosmic => DomainConstants {
            energy_scale_j: 3.73e-23,
            coherence_length_m: 4.5e-6,
            description: "Cosmic structure formation",
        },
    }
}

/// Action principle evaluated at a fixed C_U.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct McTpAction {
    pub c_u: f64,
}

impl Default for McTpAction {
    fn default() -> Self {
        Self::new(DEFAULT_C_U)
    }
}

impl McTpAction {
    pub fn new(c_u: f64) -> Self {
        Self { c_u }
    }

    /// `√C_U·İ − C_U·E_coh − C_U^1.5·Ḋ`.
    pub fn action_density(
        &self,
        info_rate: f64,
        coherent_energy: f64,
        dissipation_rate: f64,
    ) -> f64 {
        self.c_u.sqrt() * info_rate
            - self.c_u * coherent_energy
            - self.c_u.powf(1.5) * dissipation_rate
    }

    /// Stationary point for a given coherent energy: `(E/C_U, E, E/√C_U)`.
    pub fn equations_of_motion(&self, coherent_energy: f64) -> (f64, f64, f64) {
        (
            coherent_energy / self.c_u,
            coherent_energy,
            coherent_energy / self.c_u.sqrt(),
        )
    }

    /// Coherence scale `Λ_C = sqrt(ħc / (G·C_U·E_b))`, metres.
    pub fn predict_coherence_scale(&self, energy_scale_j: f64) -> f64 {
        ((HBAR * SPEED_OF_LIGHT) / (GRAVITATIONAL * self.c_u * energy_scale_j)).sqrt()
    }

    pub fn domain_coherence_scale(&self, domain: Domain) -> f64 {
        self.predict_coherence_scale(domain_constants(domain).energy_scale_j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_domain_names() {
        assert_eq!("quantum".parse::<Domain>(), Ok(Domain::Quantum));
        assert_eq!(" Neural ".parse::<Domain>(), Ok(Domain::Neural));
        assert_eq!("COSMIC".parse::<Domain>(), Ok(Domain::Cosmic));
        assert!("stellar".parse::<Domain>().is_err());
        for d in Domain::ALL {
            assert_eq!(d.to_string().parse::<Domain>(), Ok(d));
        }
    }

    #[test]
    fn action_density_terms() {
        let a = McTpAction::new(0.04);
        // 0.2*10 - 0.04*5 - 0.008*2
        assert!((a.action_density(10.0, 5.0, 2.0) - 1.784).abs() < 1e-12);
        assert_eq!(a.action_density(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn stationary_point() {
        let a = McTpAction::new(0.25);
        let (i, e, d) = a.equations_of_motion(2.0);
        assert!((i - 8.0).abs() < 1e-12);
        assert_eq!(e, 2.0);
        assert!((d - 4.0).abs() < 1e-12);
    }

    #[test]
    fn coherence_scale_matches_closed_form() {
        let a = McTpAction::default();
        let e_b = domain_constants(Domain::Quantum).energy_scale_j;
        let expected = (HBAR * SPEED_OF_LIGHT / (GRAVITATIONAL * DEFAULT_C_U * e_b)).sqrt();
        assert_eq!(a.predict_coherence_scale(e_b), expected);
        assert_eq!(a.domain_coherence_scale(Domain::Quantum), expected);
    }

    #[test]
    fn higher_energy_means_shorter_scale() {
        let a = McTpAction::default();
        let q = a.domain_coherence_scale(Domain::Quantum);
        let n = a.domain_coherence_scale(Domain::Neural);
        let c = a.domain_coherence_scale(Domain::Cosmic);
        assert!(n < c && c < q);
        assert!(q.is_finite() && q > 0.0);
    }
}
