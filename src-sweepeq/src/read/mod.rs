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

mod interpolate;
mod normalize;
mod read_curve;
mod read_descriptor;

// Re-export commonly used functions
pub use interpolate::*;
pub use normalize::*;
pub use read_curve::{parse_curve, parse_target_csv, read_curve, read_target_csv};
pub use read_descriptor::{
    BandDescriptor, parse_band_descriptor, parse_band_descriptor_with_diagnostics,
    read_band_descriptor,
};

use crate::DataError;
use std::path::Path;

fn read_text(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|e| DataError::read(path, e))
}
