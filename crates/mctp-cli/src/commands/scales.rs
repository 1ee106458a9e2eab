use mctp_core::{Domain, McTpAction, domain_constants};

pub fn run(c_u: f64, domain: Option<&str>) {
    if !(c_u.is_finite() && c_u > 0.0) {
        eprintln!("C_U must be a positive number, got {c_u}");
        std::process::exit(1);
    }

    let domains: Vec<Domain> = match domain {
        Some(name) => match name.parse::<Domain>() {
            Ok(d) => vec![d],
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => Domain::ALL.to_vec(),
    };

    let action = McTpAction::new(c_u);
    println!("📏 Coherence scale predictions (C_U = {c_u:.3e})\n");
    println!(
        "{:<8} {:>12} {:>14} {:>14}  {}",
        "Domain", "E_b (J)", "Λ_C pred (m)", "Λ_C meas (m)", "Description"
    );
    println!("{}", "-".repeat(80));
    for d in domains {
        let k = domain_constants(d);
        println!(
            "{:<8} {:>12.2e} {:>14.2e} {:>14.2e}  {}",
            d.name(),
            k.energy_scale_j,
            action.predict_coherence_scale(k.energy_scale_j),
            k.coherence_length_m,
            k.description
        );
    }
}
