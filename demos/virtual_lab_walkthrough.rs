// Walk through every experiment of one virtual lab session and print each table.
// Run with RUST_LOG=electro_lab_sim=debug to see the engine's log events.

use colored::Colorize;
use electro_lab_sim::electrochem::StandardSolution;
use electro_lab_sim::{LabConfig, LabSession, LabTable, Salt};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> electro_lab_sim::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("electro_lab_sim=info"));
    fmt().with_env_filter(filter).with_target(false).init();

    println!("{}", "⚗️  Virtual Electrochemistry Lab".bold());
    println!("================================");

    let mut lab = LabSession::new(LabConfig::default())?;

    // Part 1: equal-strength solutions of each salt
    println!("\n{}", "🧪 Standard solutions (0.1 M, 298 K)".cyan().bold());
    for salt in Salt::ALL {
        let measurement = lab.measure_standard_conductance(salt)?;
        println!("   {}", measurement);
    }
    if let Some(salt) = lab.highest_conducting_salt() {
        println!("   Highest conductance: {}", salt.to_string().green());
    }

    // Part 2: serial dilution of NaCl
    println!("\n{}", "💧 Serial dilution".cyan().bold());
    lab.measure_dilution()?;
    loop {
        let step = lab.add_diluent();
        if step.is_bounds_exceeded() {
            println!("   {} beaker is full at {} mL", "⚠️".yellow(), step.volume_ml());
            break;
        }
        lab.measure_dilution()?;
    }
    print!("{}", lab.export_csv(LabTable::Dilution));

    // Part 3: heating KCl
    println!("\n{}", "🔥 Temperature sweep".cyan().bold());
    for temperature_k in [298.0, 308.0, 318.0, 328.0, 338.0] {
        lab.measure_temperature(temperature_k)?;
    }
    if let Err(e) = lab.measure_temperature(350.0) {
        println!("   {} {}", "rejected:".yellow(), e);
    }
    print!("{}", lab.export_csv(LabTable::Temperature));

    // Part 4: Daniell cell calibration and the unknown sample
    println!("\n{}", "🔋 Daniell cell calibration".cyan().bold());
    if let Err(e) = lab.infer_sample_concentration() {
        println!("   {} {}", "not yet:".yellow(), e);
    }
    for standard in StandardSolution::ALL {
        lab.record_standard(standard)?;
    }
    lab.record_sample()?;
    print!("{}", lab.export_csv(LabTable::Electrochemistry));

    let result = lab.infer_sample_concentration()?;
    println!(
        "   Fit: EMF = {:.5}·ln(ratio) + {:.4}  (r² = {:.6})",
        result.fit.slope, result.fit.intercept, result.fit.r_squared
    );
    println!("   Estimated [Cu²⁺]: {:.4} M", result.estimated_concentration);
    println!("   Actual [Cu²⁺]:    {:.4} M", lab.reveal_sample_concentration());

    println!("\n{}", "📋 Report".cyan().bold());
    println!("{}", lab.report().to_json()?);

    println!("\n{}", "✅ Walkthrough complete".green().bold());
    Ok(())
}
