//! # mctp-core
//!
//! **One constant, three domains.**
//!
//! `mctp-core` estimates the MCTP universal constant `C_U` from quantum
//! processor measurements and checks whether it predicts correlations observed
//! in neural recordings and cosmic structure data.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mctp_core::{DataLoader, Validator, ValidatorConfig};
//!
//! let loader = DataLoader::new("data");
//! let quantum = loader.load_quantum_bundle().expect("readable quantum data");
//! let neural = loader.load_neural_observation();
//! let cosmic = loader.load_cosmic_observation();
//!
//! let mut validator = Validator::new(ValidatorConfig::default());
//! let result = validator.validate(&quantum, &neural, &cosmic).expect("paired samples");
//! println!("{}", validator.report());
//! assert_eq!(result.success, result.neural.accepted && result.cosmic.accepted);
//! ```
//!
//! ## Architecture
//!
//! Data → Quantum estimate (r, p, enhancement, C_U) → Affine predictions → Tolerance check
//!
//! Two switches select the estimator flavour:
//! - **ThresholdMode**: fixed 0.7/0.3 score cut-offs, or 70th/30th percentiles.
//! - **UncertaintyMode**: none, or a seeded bootstrap of the correlation.
//!
//! The validator owns its RNG, so two validators never share random state.

pub mod action;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod validator;

pub use action::{Domain, DomainConstants, McTpAction, domain_constants};
pub use config::{
    AcceptanceCriterion, AffineModel, CalibrationModel, ThresholdMode, UncertaintyMode,
    ValidatorConfig, load_config_from_path,
};
pub use data::{
    DataLoader, DomainObservation, ProcessorRecord, QuantumBundle, generate_sample_quantum_data,
    read_quantum_csv, write_quantum_csv,
};
pub use error::{DataError, ValidationError};
pub use report::{NO_RESULTS, render_report};
pub use validator::{
    DomainPrediction, QuantumEstimate, ValidationResult, Validator, estimate_quantum, predict,
    symmetry_enhancement, validate_estimate, within_tolerance,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
