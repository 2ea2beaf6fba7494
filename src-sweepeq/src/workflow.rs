//! SweepEQ - Parametric EQ correction of measured loudspeaker responses
//! Shared workflow steps used by binaries
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

use std::path::PathBuf;

use crate::iir::{self, BandList};
use crate::loss::{MSE_HIGH_FREQ, MSE_LOW_FREQ, banded_mse};
use crate::read::{self, NORMALIZE_FREQ};
use crate::{Curve, DataError};
use log::{info, warn};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Settings of a correction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Sample rate the bands are designed for (Hz)
    pub sample_rate: f64,
    /// Number of points of the evaluation grid
    pub grid_points: usize,
    /// Lowest grid frequency (Hz)
    pub min_freq: f64,
    /// Highest grid frequency (Hz)
    pub max_freq: f64,
    /// Lower edge of the scoring band (Hz)
    pub mse_low_freq: f64,
    /// Upper edge of the scoring band (Hz)
    pub mse_high_freq: f64,
    /// Shift the measurement to 0 dB at `normalize_freq` before anything else
    pub normalize: bool,
    /// Reference frequency for normalization (Hz)
    pub normalize_freq: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig {
            sample_rate: iir::SRATE,
            grid_points: 512,
            min_freq: 20.0,
            max_freq: 20000.0,
            mse_low_freq: MSE_LOW_FREQ,
            mse_high_freq: MSE_HIGH_FREQ,
            normalize: false,
            normalize_freq: NORMALIZE_FREQ,
        }
    }
}

/// Everything a correction run produces, on the shared log grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqReport {
    /// Evaluation grid (Hz)
    pub freqs: Array1<f64>,
    /// Measurement resampled on the grid
    pub raw: Array1<f64>,
    /// Target resampled on the grid
    pub target: Array1<f64>,
    /// Response of the bands alone
    pub eq_curve: Array1<f64>,
    /// Measurement plus bands, without preamp
    pub corrected: Array1<f64>,
    /// Measurement plus bands plus preamp
    pub eq_final: Array1<f64>,
    /// MSE of the measurement against the target (dB²)
    pub mse_raw: f64,
    /// MSE of the corrected response against the target (dB²)
    pub mse_eq: f64,
    /// Bands and preamp that were applied
    pub band_list: BandList,
}

/// Input files of a correction run.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Two-column measured response (no header)
    pub measurement: PathBuf,
    /// Target profile CSV (with a header line)
    pub target: PathBuf,
    /// Band descriptor written by the optimizer
    pub descriptor: PathBuf,
}

/// Apply `band_list` to `measured` and score both curves against `target`.
///
/// The raw MSE is computed on the measurement's own samples and the
/// corrected MSE on the grid; both interpolate the target linearly in
/// frequency. Resampling onto the grid is done in log frequency.
pub fn run_correction(
    measured: &Curve,
    target: &Curve,
    band_list: &BandList,
    config: &WorkflowConfig,
) -> EqReport {
    if !measured.is_strictly_increasing() {
        warn!("measured frequencies are not strictly increasing, resampling may be wrong");
    }
    if !target.is_strictly_increasing() {
        warn!("target frequencies are not strictly increasing, resampling may be wrong");
    }

    let measured = if config.normalize {
        read::normalize_at(measured, config.normalize_freq)
    } else {
        measured.clone()
    };

    let freqs =
        read::create_log_frequency_grid(config.grid_points, config.min_freq, config.max_freq);
    let raw = read::interpolate_log_space(&measured, &freqs);
    let target_on_grid = read::interpolate_log_space(target, &freqs);
    info!(
        "resampled {} measured and {} target points onto a {}-point grid",
        measured.len(),
        target.len(),
        freqs.len()
    );

    let correction = iir::combine(&freqs, &raw, band_list, config.sample_rate);
    info!(
        "applied {} bands with {:+.1} dB preamp",
        band_list.len(),
        band_list.preamp_db
    );

    let mse_raw = banded_mse(
        &measured.freq,
        &measured.spl,
        target,
        config.mse_low_freq,
        config.mse_high_freq,
    );
    let mse_eq = banded_mse(
        &freqs,
        &correction.with_preamp,
        target,
        config.mse_low_freq,
        config.mse_high_freq,
    );
    info!("MSE raw {:.3} dB², EQ'd {:.3} dB²", mse_raw, mse_eq);

    EqReport {
        freqs,
        raw,
        target: target_on_grid,
        eq_curve: correction.eq_curve,
        corrected: correction.corrected,
        eq_final: correction.with_preamp,
        mse_raw,
        mse_eq,
        band_list: band_list.clone(),
    }
}

/// Read the measurement, target and descriptor, then run [`run_correction`].
///
/// # Errors
/// When one of the files cannot be read. Malformed lines are skipped.
pub fn run_from_files(paths: &InputPaths, config: &WorkflowConfig) -> Result<EqReport, DataError> {
    let measured = read::read_curve(&paths.measurement)?;
    let target = read::read_target_csv(&paths.target)?;
    let band_list = read::read_band_descriptor(&paths.descriptor)?;
    info!(
        "loaded {} ({} points), {} ({} points), {} ({} bands)",
        paths.measurement.display(),
        measured.len(),
        paths.target.display(),
        target.len(),
        paths.descriptor.display(),
        band_list.len()
    );
    Ok(run_correction(&measured, &target, &band_list, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iir::FilterBand;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn flat(level: f64) -> Curve {
        let freq = read::create_log_frequency_grid(200, 10.0, 24_000.0);
        let spl = Array1::from_elem(freq.len(), level);
        Curve::new(freq, spl)
    }

    #[test]
    fn defaults_match_the_measurement_chain() {
        let config = WorkflowConfig::default();
        assert_eq!(config.sample_rate, 48000.0);
        assert_eq!(config.grid_points, 512);
        assert_eq!(config.min_freq, 20.0);
        assert_eq!(config.max_freq, 20000.0);
        assert_eq!(config.mse_low_freq, 100.0);
        assert_eq!(config.mse_high_freq, 9000.0);
        assert!(!config.normalize);
    }

    #[test]
    fn no_band_and_no_preamp_keeps_the_measurement() {
        let measured = flat(3.0);
        let target = flat(0.0);
        let report = run_correction(
            &measured,
            &target,
            &BandList::default(),
            &WorkflowConfig::default(),
        );
        assert_eq!(report.freqs.len(), 512);
        for i in 0..report.freqs.len() {
            assert!(approx_eq(report.raw[i], 3.0, 1e-12));
            assert!(approx_eq(report.eq_final[i], 3.0, 1e-9));
            assert!(report.eq_curve[i].abs() < 1e-9);
        }
        assert!(approx_eq(report.mse_raw, 9.0, 1e-12));
        assert!(approx_eq(report.mse_eq, 9.0, 1e-9));
    }

    #[test]
    fn preamp_can_correct_a_flat_offset() {
        let measured = flat(3.0);
        let target = flat(0.0);
        let bands = BandList::new(-3.0, vec![]);
        let report = run_correction(&measured, &target, &bands, &WorkflowConfig::default());
        assert!(report.mse_eq < 1e-12);
        assert!(approx_eq(report.mse_raw, 9.0, 1e-12));
    }

    #[test]
    fn normalization_moves_the_measurement() {
        let measured = flat(3.0);
        let target = flat(0.0);
        let config = WorkflowConfig {
            normalize: true,
            ..WorkflowConfig::default()
        };
        let report = run_correction(&measured, &target, &BandList::default(), &config);
        assert!(report.mse_raw < 1e-12);
        assert!(report.raw.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn band_boost_shows_in_eq_curve_and_final() {
        let measured = flat(0.0);
        let target = flat(0.0);
        let bands = BandList::new(-2.0, vec![FilterBand::peaking(1000.0, 1.4, 6.0)]);
        let report = run_correction(&measured, &target, &bands, &WorkflowConfig::default());

        let at_1k = |values: &Array1<f64>| {
            let curve = Curve::new(report.freqs.clone(), values.clone());
            read::interpolate_log_space(&curve, &ndarray::array![1000.0])[0]
        };
        assert!(approx_eq(at_1k(&report.eq_curve), 6.0, 0.05));
        assert!(approx_eq(at_1k(&report.corrected), 6.0, 0.05));
        assert!(approx_eq(at_1k(&report.eq_final), 4.0, 0.05));
        assert!(report.mse_eq > 0.0);
    }
}
