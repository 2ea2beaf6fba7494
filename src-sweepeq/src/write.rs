//! SweepEQ - Parametric EQ correction of measured loudspeaker responses
//! Export of curves and band descriptors
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

use std::path::Path;

use crate::iir::{BandList, format_band_descriptor};
use crate::{Curve, DataError};
use ndarray::Array1;

/// Format a curve as `frequency<TAB>level` lines with two decimals.
pub fn format_curve(curve: &Curve) -> String {
    curve
        .freq
        .iter()
        .zip(curve.spl.iter())
        .map(|(f, s)| format!("{:.2}\t{:.2}\n", f, s))
        .collect()
}

/// Write a curve as a two-column text file.
pub fn write_curve(path: &Path, curve: &Curve) -> Result<(), DataError> {
    std::fs::write(path, format_curve(curve)).map_err(|e| DataError::write(path, e))
}

/// Write an analysis result without its first (DC) bin.
///
/// The analysis pipeline starts its grid at 0 Hz, which has no place on a
/// log-frequency axis.
pub fn write_measurement(path: &Path, curve: &Curve) -> Result<(), DataError> {
    let start = curve.len().min(1);
    let trimmed = Curve::new(
        curve.freq.slice(ndarray::s![start..]).to_owned(),
        curve.spl.slice(ndarray::s![start..]).to_owned(),
    );
    write_curve(path, &trimmed)
}

/// Write several curves sharing one frequency grid as CSV.
///
/// # Arguments
/// * `path` - Output file
/// * `freqs` - Shared frequency grid (first column, `frequency`)
/// * `columns` - Named level arrays, each as long as `freqs`
///
/// # Errors
/// When the file cannot be written or a column is shorter than `freqs`.
pub fn write_curves_csv(
    path: &Path,
    freqs: &Array1<f64>,
    columns: &[(&str, &Array1<f64>)],
) -> Result<(), DataError> {
    if let Some((_, col)) = columns.iter().find(|(_, c)| c.len() != freqs.len()) {
        return Err(DataError::LengthMismatch {
            freq: freqs.len(),
            spl: col.len(),
        });
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["frequency"];
    header.extend(columns.iter().map(|(name, _)| *name));
    writer.write_record(&header)?;

    for (i, f) in freqs.iter().enumerate() {
        let mut record = vec![f.to_string()];
        record.extend(columns.iter().map(|(_, c)| c[i].to_string()));
        writer.write_record(&record)?;
    }

    writer.flush().map_err(|e| DataError::write(path, e))?;
    Ok(())
}

/// Write a band list as a descriptor file, readable by [`crate::read_band_descriptor`].
pub fn write_band_descriptor(
    path: &Path,
    comment: &str,
    bands: &BandList,
) -> Result<(), DataError> {
    std::fs::write(path, format_band_descriptor(comment, bands))
        .map_err(|e| DataError::write(path, e))
}
