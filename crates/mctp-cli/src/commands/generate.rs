use mctp_core::{DataLoader, generate_sample_quantum_data, write_quantum_csv};

pub fn run(samples: usize, seed: u64, data_dir: &str) {
    if samples == 0 {
        eprintln!("Need at least one processor sample.");
        std::process::exit(1);
    }

    let loader = DataLoader::new(data_dir);
    let path = loader.quantum_path();
    let records = generate_sample_quantum_data(samples, seed);

    if let Err(e) = write_quantum_csv(&path, &records) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let high = records.iter().filter(|r| r.quantum_volume == 128).count();
    println!(
        "📄 Wrote {} synthetic processors to {} (seed {seed}, {high} with QV128)",
        records.len(),
        path.display()
    );
}
