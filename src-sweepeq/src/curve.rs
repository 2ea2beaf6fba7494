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

use crate::DataError;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// A frequency response: levels in dB at increasing frequencies in Hz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Frequency points (Hz)
    pub freq: Array1<f64>,
    /// Level at each frequency (dB)
    pub spl: Array1<f64>,
}

impl Curve {
    /// Build a curve from arrays known to have the same length.
    ///
    /// # Panics
    /// If `freq` and `spl` differ in length; see [`Curve::try_new`].
    pub fn new(freq: Array1<f64>, spl: Array1<f64>) -> Self {
        assert_eq!(freq.len(), spl.len(), "curve arrays differ in length");
        Curve { freq, spl }
    }

    /// Build a curve, checking that both arrays have the same length.
    pub fn try_new(freq: Array1<f64>, spl: Array1<f64>) -> Result<Self, DataError> {
        if freq.len() != spl.len() {
            return Err(DataError::LengthMismatch {
                freq: freq.len(),
                spl: spl.len(),
            });
        }
        Ok(Curve { freq, spl })
    }

    /// Build a curve from the parallel vectors produced by the analysis pipeline.
    pub fn from_vecs(freq: Vec<f64>, spl: Vec<f64>) -> Result<Self, DataError> {
        Self::try_new(Array1::from(freq), Array1::from(spl))
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    /// True when frequencies are strictly increasing, as interpolation requires.
    pub fn is_strictly_increasing(&self) -> bool {
        self.freq
            .iter()
            .zip(self.freq.iter().skip(1))
            .all(|(a, b)| a < b)
    }
}
