//! Observation bundles for the three domains.
//!
//! Quantum data comes from `<data_dir>/quantum/ibm_processor_data.csv` when it
//! exists, otherwise from a fixed 8-processor sample. Neural and cosmic
//! observations are published correlation values.
//!
//! # CSV format
//!
//! Comma-delimited, one header row, one row per processor. Only the
//! `symmetry_score` and `T2_mean` columns are read; column order is free and
//! other columns are ignored. Cells may be wrapped in double quotes, and commas
//! inside quotes do not split the cell.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Location of the quantum CSV relative to the data directory.
pub const QUANTUM_CSV: &str = "quantum/ibm_processor_data.csv";
pub const SYMMETRY_COLUMN: &str = "symmetry_score";
pub const COHERENCE_COLUMN: &str = "T2_mean";

pub const FALLBACK_SYMMETRY_SCORES: [f64; 8] = [0.71, 0.56, 0.72, 0.75, 0.77, 0.68, 0.73, 0.79];
pub const FALLBACK_COHERENCE_TIMES: [f64; 8] =
    [176.8, 148.5, 172.3, 174.9, 173.2, 169.8, 175.1, 178.3];

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

/// Paired per-processor measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumBundle {
    /// Unitless, conventionally in [0, 1].
    pub symmetry_scores: Vec<f64>,
    /// Mean T2 coherence time, microseconds.
    pub coherence_times: Vec<f64>,
}

impl QuantumBundle {
    pub fn new(symmetry_scores: Vec<f64>, coherence_times: Vec<f64>) -> Self {
        Self {
            symmetry_scores,
            coherence_times,
        }
    }

    /// The built-in 8-processor sample.
    pub fn fallback() -> Self {
        Self::new(
            FALLBACK_SYMMETRY_SCORES.to_vec(),
            FALLBACK_COHERENCE_TIMES.to_vec(),
        )
    }

    pub fn n_processors(&self) -> usize {
        self.symmetry_scores.len()
    }
}

/// A single observed correlation from a non-quantum domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainObservation {
    /// Observed correlation in [-1, 1].
    pub correlation: f64,
    pub uncertainty: Option<f64>,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Loads the three observation bundles.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new("data")
    }
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn quantum_path(&self) -> PathBuf {
        self.data_dir.join(QUANTUM_CSV)
    }

    /// Read the quantum CSV, or the fallback sample when the file is absent.
    pub fn load_quantum_bundle(&self) -> Result<QuantumBundle, DataError> {
        let path = self.quantum_path();
        if !path.exists() {
            log::info!(
                "{} not found, loading sample quantum data ({} processors)",
                path.display(),
                FALLBACK_SYMMETRY_SCORES.len()
            );
            return Ok(QuantumBundle::fallback());
        }
        let bundle = read_quantum_csv(&path)?;
        log::info!(
            "loaded {} processors from {}",
            bundle.n_processors(),
            path.display()
        );
        Ok(bundle)
    }

    pub fn load_neural_observation(&self) -> DomainObservation {
        DomainObservation {
            correlation: 0.39,
            uncertainty: Some(0.07),
            description: "Transfer entropy vs behavioral performance".to_string(),
        }
    }

    pub fn load_cosmic_observation(&self) -> DomainObservation {
        DomainObservation {
            correlation: 0.34,
            uncertainty: Some(0.08),
            description: "Coherence metric vs specific star formation rate".to_string(),
        }
    }
}

/// Split one CSV row on commas outside double quotes, then strip the quotes.
fn split_row(line: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                cells.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells
        .into_iter()
        .map(|c| c.trim().trim_matches('"'))
        .collect()
}

/// Parse `symmetry_score` and `T2_mean` out of a processor CSV.
pub fn read_quantum_csv(path: &Path) -> Result<QuantumBundle, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = raw
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());
    let header = lines.next().map(|(_, l)| split_row(l)).unwrap_or_default();
    let column = |name: &str| {
        header
            .iter()
            .position(|h| *h == name)
            .ok_or_else(|| DataError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let sym_idx = column(SYMMETRY_COLUMN)?;
    let coh_idx = column(COHERENCE_COLUMN)?;

    let mut bundle = QuantumBundle::new(Vec::new(), Vec::new());
    for (idx, line) in lines {
        let cells = split_row(line);
        let cell = |i: usize| -> Result<f64, DataError> {
            let value = cells.get(i).copied().unwrap_or("");
            value.parse::<f64>().map_err(|_| DataError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                value: value.to_string(),
            })
        };
        bundle.symmetry_scores.push(cell(sym_idx)?);
        bundle.coherence_times.push(cell(coh_idx)?);
    }
    Ok(bundle)
}

// ---------------------------------------------------------------------------
// Synthetic data
// ---------------------------------------------------------------------------

/// One row of a processor CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorRecord {
    pub processor: String,
    pub symmetry_score: f64,
    #[serde(rename = "T1_mean")]
    pub t1_mean: f64,
    #[serde(rename = "T2_mean")]
    pub t2_mean: f64,
    pub quantum_volume: u32,
}

/// Realistic synthetic processors: coherence grows with symmetry plus noise.
pub fn generate_sample_quantum_data(n_samples: usize, seed: u64) -> Vec<ProcessorRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base_coherence = 150.0; // µs

    let symmetry: Vec<f64> = (0..n_samples)
        .map(|_| mctp_stats::sample_normal(&mut rng, 0.7, 0.1).clamp(0.4, 0.9))
        .collect();
    let coherence: Vec<f64> = symmetry
        .iter()
        .map(|s| {
            (base_coherence + 30.0 * s + mctp_stats::sample_normal(&mut rng, 0.0, 5.0))
                .clamp(100.0, 200.0)
        })
        .collect();

    symmetry
        .into_iter()
        .zip(coherence)
        .enumerate()
        .map(|(i, (s, t2))| ProcessorRecord {
            processor: format!("ibm_sample_{i:02}"),
            symmetry_score: s,
            t1_mean: t2 + mctp_stats::sample_normal(&mut rng, -10.0, 5.0),
            t2_mean: t2,
            quantum_volume: if s < 0.7 { 64 } else { 128 },
        })
        .collect()
}

/// Write processor records as CSV, creating parent directories.
pub fn write_quantum_csv(path: &Path, records: &[ProcessorRecord]) -> Result<(), DataError> {
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = fs::File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    writeln!(
        w,
        "processor,{SYMMETRY_COLUMN},T1_mean,{COHERENCE_COLUMN},quantum_volume"
    )
    .map_err(io_err)?;
    for r in records {
        writeln!(
            w,
            "{},{},{},{},{}",
            r.processor, r.symmetry_score, r.t1_mean, r.t2_mean, r.quantum_volume
        )
        .map_err(io_err)?;
    }
    w.flush().map_err(io_err)
}
