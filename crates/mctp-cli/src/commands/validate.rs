use std::path::Path;

use mctp_core::{
    DataLoader, Domain, McTpAction, UncertaintyMode, ValidationResult, Validator, ValidatorConfig,
};

pub struct ValidateCommandConfig<'a> {
    pub data_dir: &'a str,
    pub config_path: Option<&'a str>,
    pub full: bool,
    pub threshold: Option<&'a str>,
    pub uncertainty: Option<&'a str>,
    pub bootstrap: Option<usize>,
    pub acceptance: Option<&'a str>,
    pub tolerance: Option<f64>,
    pub seed: Option<u64>,
    pub output_path: Option<&'a str>,
    pub include_scales: bool,
}

/// Base config (file, preset or default) with command-line overrides applied.
pub fn build_config(cfg: &ValidateCommandConfig<'_>) -> Result<ValidatorConfig, String> {
    let mut config = match cfg.config_path {
        Some(path) => {
            mctp_core::load_config_from_path(Path::new(path)).map_err(|e| e.to_string())?
        }
        None if cfg.full => ValidatorConfig::full(),
        None => ValidatorConfig::default(),
    };

    if let Some(t) = cfg.threshold {
        config.threshold = super::parse_threshold(t)?;
    }
    match (cfg.uncertainty, cfg.bootstrap) {
        (Some(u), n) => config.uncertainty = super::parse_uncertainty(u, n)?,
        (None, Some(n)) => config.uncertainty = UncertaintyMode::Bootstrap { resamples: n },
        (None, None) => {}
    }
    if let Some(a) = cfg.acceptance {
        config.acceptance = super::parse_acceptance(a)?;
    }
    if let Some(t) = cfg.tolerance {
        config.tolerance = t;
    }
    if let Some(s) = cfg.seed {
        config.seed = s;
    }
    config.check()?;
    Ok(config)
}

pub fn run(cfg: ValidateCommandConfig<'_>) {
    let config = match build_config(&cfg) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    log::debug!("validator config: {config:?}");

    let loader = DataLoader::new(cfg.data_dir);
    let quantum = match loader.load_quantum_bundle() {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Failed to load quantum data: {e}");
            std::process::exit(1);
        }
    };
    let neural = loader.load_neural_observation();
    let cosmic = loader.load_cosmic_observation();

    println!("🧪 MCTP cross-domain validation\n");
    println!("  Quantum: {} processors", quantum.n_processors());
    println!(
        "  Neural correlation: {:.3} ({})",
        neural.correlation, neural.description
    );
    println!(
        "  Cosmic correlation: {:.3} ({})",
        cosmic.correlation, cosmic.description
    );
    if let UncertaintyMode::Bootstrap { resamples } = config.uncertainty {
        println!("  Bootstrap: {resamples} resamples, seed {}", config.seed);
    }

    let mut validator = Validator::new(config);
    let result = match validator.validate(&quantum, &neural, &cosmic) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Validation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("\n{}", validator.report());

    if cfg.include_scales {
        let action = McTpAction::default();
        println!("📏 Coherence scale predictions (C_U = {:.2e}):", action.c_u);
        for domain in Domain::ALL {
            println!(
                "   {:<8} {:.2e} m",
                domain.name(),
                action.domain_coherence_scale(domain)
            );
        }
        println!();
    }

    if let Some(path) = cfg.output_path {
        if let Err(e) = write_result_json(Path::new(path), &result) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        println!("📄 Result saved to: {path}");
    }
}

/// Pretty-printed JSON of `result` at `path`.
pub fn write_result_json(path: &Path, result: &ValidationResult) -> Result<(), String> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| format!("Failed to serialize result: {e}"))?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write result to {}: {e}", path.display()))
}
