//! SweepEQ - Parametric EQ correction of measured loudspeaker responses
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use log::info;
use std::error::Error;
use std::path::Path;
use sweepeq::EqReport;
use sweepeq::cli::Args;
use sweepeq::write;

/// Number of bands listed on the console
const MAX_LISTED_BANDS: usize = 10;

fn print_summary(report: &EqReport) {
    println!("MSE Raw vs Target: {:.2} dB²", report.mse_raw);
    println!("MSE EQ'd vs Target: {:.2} dB²", report.mse_eq);
    println!("Preamp: {:.1} dB", report.band_list.preamp_db);
    for band in report.band_list.iter().take(MAX_LISTED_BANDS) {
        println!("  {}", band);
    }
    if report.band_list.len() > MAX_LISTED_BANDS {
        println!(
            "  ... {} more bands not shown",
            report.band_list.len() - MAX_LISTED_BANDS
        );
    }
}

fn save_curves(path: &Path, report: &EqReport) -> Result<(), Box<dyn Error>> {
    write::write_curves_csv(
        path,
        &report.freqs,
        &[
            ("raw", &report.raw),
            ("target", &report.target),
            ("eq", &report.eq_curve),
            ("corrected", &report.corrected),
            ("final", &report.eq_final),
        ],
    )?;
    println!("📈 Curves saved to: {}", path.display());
    Ok(())
}

fn save_report(path: &Path, report: &EqReport) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    println!("🗂  Report saved to: {}", path.display());
    Ok(())
}

fn save_descriptor(path: &Path, args: &Args, report: &EqReport) -> Result<(), Box<dyn Error>> {
    let comment = format!(
        "# SweepEQ Parametric Equalizer Settings\n\
         # Measurement: {}\n# Filters: {}\n# Generated: {}",
        args.measurement.display(),
        report.band_list.len(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    write::write_band_descriptor(path, &comment, &report.band_list)?;
    println!("🕶 PEQ settings saved to: {}", path.display());
    Ok(())
}

/// Apply an EQ band descriptor to a measurement and compare against a target.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    sweepeq::cli::validate_args_or_exit(&args);

    let config = args.workflow_config();
    info!("running with {:?}", config);
    let report = sweepeq::run_from_files(&args.input_paths(), &config)?;

    print_summary(&report);

    if let Some(path) = &args.curves_csv {
        save_curves(path, &report)?;
    }
    if let Some(path) = &args.json {
        save_report(path, &report)?;
    }
    if let Some(path) = &args.write_descriptor {
        save_descriptor(path, &args, &report)?;
    }

    Ok(())
}
