//! CLI for MCTP — one constant, three domains.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mctp")]
#[command(about = "mctp — estimate C_U from quantum processors and test it across domains")]
#[command(version = mctp_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate C_U, predict neural and cosmic correlations, print the report
    Validate {
        /// Directory holding quantum/ibm_processor_data.csv (sample data if absent)
        #[arg(long, default_value = "data")]
        data_dir: String,

        /// Validator config JSON; flags below override it
        #[arg(long)]
        config: Option<String>,

        /// Start from the full preset: percentile split, bootstrap, propagated tolerance
        #[arg(long)]
        full: bool,

        /// High/low symmetry split
        #[arg(long, value_parser = ["fixed", "percentile"])]
        threshold: Option<String>,

        /// Correlation uncertainty estimate
        #[arg(long, value_parser = ["none", "bootstrap"])]
        uncertainty: Option<String>,

        /// Bootstrap resamples (implies --uncertainty bootstrap)
        #[arg(long)]
        bootstrap: Option<usize>,

        /// Acceptance criterion: fixed tolerance or propagated 1σ uncertainty
        #[arg(long, value_parser = ["fixed", "propagated"])]
        acceptance: Option<String>,

        /// Absolute tolerance for fixed acceptance
        #[arg(long)]
        tolerance: Option<f64>,

        /// RNG seed for bootstrap resampling
        #[arg(long)]
        seed: Option<u64>,

        /// Write the validation result as JSON
        #[arg(long)]
        output: Option<String>,

        /// Also print coherence scale predictions for each domain
        #[arg(long)]
        scales: bool,
    },

    /// Write a synthetic quantum processor CSV where `validate` will find it
    Generate {
        /// Number of processors
        #[arg(long, default_value = "20")]
        samples: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Data directory
        #[arg(long, default_value = "data")]
        data_dir: String,
    },

    /// Print predicted coherence scales Λ_C for quantum, neural and cosmic domains
    Scales {
        /// C_U used for the prediction
        #[arg(long, default_value_t = mctp_core::action::DEFAULT_C_U)]
        c_u: f64,

        /// Single domain: quantum, neural or cosmic
        #[arg(long)]
        domain: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            data_dir,
            config,
            full,
            threshold,
            uncertainty,
            bootstrap,
            acceptance,
            tolerance,
            seed,
            output,
            scales,
        } => commands::validate::run(commands::validate::ValidateCommandConfig {
            data_dir: &data_dir,
            config_path: config.as_deref(),
            full,
            threshold: threshold.as_deref(),
            uncertainty: uncertainty.as_deref(),
            bootstrap,
            acceptance: acceptance.as_deref(),
            tolerance,
            seed,
            output_path: output.as_deref(),
            include_scales: scales,
        }),
        Commands::Generate {
            samples,
            seed,
            data_dir,
        } => commands::generate::run(samples, seed, &data_dir),
        Commands::Scales { c_u, domain } => commands::scales::run(c_u, domain.as_deref()),
    }
}
