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
//!
//! This crate reads a measured frequency response, a target profile and a
//! band descriptor produced by an external optimizer, applies the bands to
//! the measurement and scores raw and corrected curves against the target.
//!
//! - `sweepeq_iir`: band responses and cascading

// Re-export external crate functionality
pub use sweepeq_iir as iir;

/// Common CLI argument definitions
pub mod cli;
/// Frequency response curves
pub mod curve;
/// Error type shared by readers and writers
pub mod error;
/// Fit scoring against a target
pub mod loss;
/// Data reading and parsing functions
pub mod read;
/// End-to-end correction run
pub mod workflow;
/// Curve and report export
pub mod write;

// Re-export commonly used items
pub use curve::Curve;
pub use error::DataError;
pub use iir::{BandKind, BandList, Correction, FilterBand};
pub use loss::{banded_mse, fit_mse};
pub use read::*;
pub use workflow::*;
