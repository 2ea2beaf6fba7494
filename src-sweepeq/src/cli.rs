//! SweepEQ - Parametric EQ correction of measured loudspeaker responses
//! Command-line interface definitions
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

use crate::workflow::{InputPaths, WorkflowConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process;

/// Apply a band descriptor to a measured response and score it against a target.
#[derive(Parser, Debug, Clone)]
#[command(author, about, long_about = None)]
pub struct Args {
    /// Measured response, two columns (frequency, level) without header.
    #[arg(short, long)]
    pub measurement: PathBuf,

    /// Target profile CSV (frequency,level) with one header line.
    #[arg(short, long)]
    pub target: PathBuf,

    /// Band descriptor (Preamp / Filter lines) to apply.
    #[arg(short, long)]
    pub eq: PathBuf,

    /// The sample rate the bands are designed for.
    #[arg(short, long, default_value_t = 48000.0, value_parser = parse_strictly_positive_f64)]
    pub sample_rate: f64,

    /// Number of points of the log-spaced evaluation grid.
    #[arg(long, default_value_t = 512, value_parser = parse_strictly_positive_usize)]
    pub grid_points: usize,

    /// Lowest frequency of the evaluation grid.
    #[arg(long, default_value_t = 20.0, value_parser = parse_strictly_positive_f64)]
    pub min_freq: f64,

    /// Highest frequency of the evaluation grid.
    #[arg(long, default_value_t = 20000.0, value_parser = parse_strictly_positive_f64)]
    pub max_freq: f64,

    /// Shift the measurement to 0 dB at 1 kHz before applying the bands.
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Write grid, raw, target, EQ and corrected curves to this CSV file.
    #[arg(long)]
    pub curves_csv: Option<PathBuf>,

    /// Write the full report as JSON to this file.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the band list back as a descriptor to this file.
    #[arg(long)]
    pub write_descriptor: Option<PathBuf>,
}

impl Args {
    /// Workflow settings carried by the arguments.
    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            sample_rate: self.sample_rate,
            grid_points: self.grid_points,
            min_freq: self.min_freq,
            max_freq: self.max_freq,
            normalize: self.normalize,
            ..WorkflowConfig::default()
        }
    }

    pub fn input_paths(&self) -> InputPaths {
        InputPaths {
            measurement: self.measurement.clone(),
            target: self.target.clone(),
            descriptor: self.eq.clone(),
        }
    }
}

/// Check relations between arguments that clap cannot express.
pub fn validate_args(args: &Args) -> Result<(), String> {
    if args.min_freq >= args.max_freq {
        return Err(format!(
            "Invalid frequency range: min_freq ({}) must be below max_freq ({})",
            args.min_freq, args.max_freq
        ));
    }

    let nyquist = args.sample_rate / 2.0;
    if args.max_freq > nyquist {
        return Err(format!(
            "Invalid frequency range: max_freq ({}) is above Nyquist ({}) for sample rate {}",
            args.max_freq, nyquist, args.sample_rate
        ));
    }

    Ok(())
}

/// Validate arguments and exit with status 1 on failure.
pub fn validate_args_or_exit(args: &Args) {
    if let Err(error) = validate_args(args) {
        eprintln!("❌ Validation Error: {}", error);
        process::exit(1);
    }
}

// Custom value parser to enforce strictly positive f64 (> 0)
fn parse_strictly_positive_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("invalid float: {s}"))?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err("value must be strictly positive (> 0)".to_string())
    }
}

fn parse_strictly_positive_usize(s: &str) -> Result<usize, String> {
    let v: usize = s.parse().map_err(|_| format!("invalid integer: {s}"))?;
    if v > 0 {
        Ok(v)
    } else {
        Err("value must be at least 1".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "sweepeq-test",
        "--measurement",
        "FR.txt",
        "--target",
        "target.csv",
        "--eq",
        "speaker_eq.txt",
    ];

    fn with(extra: &[&str]) -> Vec<String> {
        REQUIRED
            .iter()
            .chain(extra.iter())
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn parse_defaults() {
        let args = Args::parse_from(REQUIRED);
        assert_eq!(args.sample_rate, 48000.0);
        assert_eq!(args.grid_points, 512);
        assert_eq!(args.min_freq, 20.0);
        assert_eq!(args.max_freq, 20000.0);
        assert!(!args.normalize);
        assert!(args.curves_csv.is_none());
        assert!(args.json.is_none());
        assert!(args.write_descriptor.is_none());
        assert_eq!(args.workflow_config(), WorkflowConfig::default());
    }

    #[test]
    fn paths_are_passed_through() {
        let args = Args::parse_from(REQUIRED);
        let paths = args.input_paths();
        assert_eq!(paths.measurement, PathBuf::from("FR.txt"));
        assert_eq!(paths.target, PathBuf::from("target.csv"));
        assert_eq!(paths.descriptor, PathBuf::from("speaker_eq.txt"));
    }

    #[test]
    fn inputs_are_required() {
        assert!(Args::try_parse_from(["sweepeq-test"]).is_err());
        assert!(Args::try_parse_from(["sweepeq-test", "--measurement", "FR.txt"]).is_err());
    }

    #[test]
    fn sample_rate_must_be_strictly_positive() {
        assert!(Args::try_parse_from(with(&["--sample-rate", "0"])).is_err());
        assert!(Args::try_parse_from(with(&["--sample-rate", "-44100"])).is_err());
        let args = Args::try_parse_from(with(&["--sample-rate", "96000"])).unwrap();
        assert_eq!(args.workflow_config().sample_rate, 96000.0);
    }

    #[test]
    fn grid_points_rejects_zero() {
        assert!(Args::try_parse_from(with(&["--grid-points", "0"])).is_err());
        assert!(Args::try_parse_from(with(&["--grid-points", "abc"])).is_err());
    }

    #[test]
    fn normalize_flag_reaches_config() {
        let args = Args::parse_from(with(&["--normalize"]));
        assert!(args.workflow_config().normalize);
    }

    #[test]
    fn validate_args_valid_config() {
        let args = Args::parse_from(REQUIRED);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn validate_args_min_freq_greater_than_max_freq() {
        let mut args = Args::parse_from(REQUIRED);
        args.min_freq = 1000.0;
        args.max_freq = 500.0;
        let result = validate_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid frequency range"));
    }

    #[test]
    fn validate_args_max_freq_above_nyquist() {
        let mut args = Args::parse_from(REQUIRED);
        args.sample_rate = 32000.0;
        let result = validate_args(&args);
        assert!(result.unwrap_err().contains("Nyquist"));
    }
}
