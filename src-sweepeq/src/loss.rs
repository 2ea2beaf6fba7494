//! SweepEQ - Parametric EQ correction of measured loudspeaker responses
//! Fit scoring against a target curve
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

use crate::Curve;
use crate::read::interpolate_linear_at;
use ndarray::Array1;

/// Lower edge of the scoring band (Hz)
pub const MSE_LOW_FREQ: f64 = 100.0;
/// Upper edge of the scoring band (Hz)
pub const MSE_HIGH_FREQ: f64 = 9000.0;

/// Mean squared error between `values` and `target` inside `[f_lo, f_hi]`
///
/// The target is interpolated linearly in frequency (not in log frequency)
/// at each in-band frequency of `freqs`. Samples outside the band are
/// ignored; with no in-band sample the error is 0.
///
/// # Arguments
/// * `freqs` - Frequencies of the candidate samples (Hz)
/// * `values` - Candidate levels (dB)
/// * `target` - Target curve, on its own grid
/// * `f_lo`, `f_hi` - Band edges, inclusive
///
/// # Returns
/// * MSE in dB²
pub fn banded_mse(
    freqs: &Array1<f64>,
    values: &Array1<f64>,
    target: &Curve,
    f_lo: f64,
    f_hi: f64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (&f, &v) in freqs.iter().zip(values.iter()) {
        if f >= f_lo && f <= f_hi {
            let diff = v - interpolate_linear_at(f, target);
            sum += diff * diff;
            count += 1;
        }
    }
    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// MSE of a curve against a target over 100 Hz - 9 kHz
pub fn fit_mse(curve: &Curve, target: &Curve) -> f64 {
    banded_mse(&curve.freq, &curve.spl, target, MSE_LOW_FREQ, MSE_HIGH_FREQ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn wiggly(n: usize) -> Curve {
        let freq = Array1::logspace(10.0, 1.0, 4.5, n);
        let spl = freq.mapv(|f: f64| (f.log10() * 7.3).sin() * 4.0 + 0.1);
        Curve::new(freq, spl)
    }

    #[test]
    fn curve_against_itself_is_zero() {
        let c = wiggly(300);
        assert_eq!(fit_mse(&c, &c), 0.0);
        assert_eq!(banded_mse(&c.freq, &c.spl, &c, 20.0, 20_000.0), 0.0);
        assert_eq!(banded_mse(&c.freq, &c.spl, &c, 1000.0, 1000.0), 0.0);
    }

    #[test]
    fn constant_offset_gives_its_square() {
        let c = wiggly(200);
        let shifted = Curve::new(c.freq.clone(), &c.spl + 2.0);
        assert!(approx_eq(fit_mse(&shifted, &c), 4.0, 1e-9));
    }

    #[test]
    fn samples_outside_the_band_are_ignored() {
        let target = Curve::new(array![50.0, 20_000.0], array![0.0, 0.0]);
        let freqs = array![50.0, 99.0, 100.0, 9000.0, 9001.0, 15_000.0];
        let values = array![100.0, 100.0, 1.0, 3.0, 100.0, 100.0];
        let mse = banded_mse(&freqs, &values, &target, MSE_LOW_FREQ, MSE_HIGH_FREQ);
        assert!(approx_eq(mse, 5.0, 1e-12));
    }

    #[test]
    fn no_sample_in_band_is_zero() {
        let target = Curve::new(array![100.0, 1000.0], array![0.0, 0.0]);
        assert_eq!(
            banded_mse(&array![20.0, 50.0], &array![5.0, 5.0], &target, 100.0, 9000.0),
            0.0
        );
    }

    #[test]
    fn target_is_interpolated_linearly_in_frequency() {
        let target = Curve::new(array![100.0, 10_000.0], array![0.0, 9.9]);
        // linear in Hz: level at 1000 Hz is 0.9 dB
        let mse = banded_mse(&array![1000.0], &array![0.9], &target, 100.0, 9000.0);
        assert!(approx_eq(mse, 0.0, 1e-12));
    }

    #[test]
    fn mse_is_never_negative() {
        let a = wiggly(128);
        let b = Curve::new(a.freq.clone(), a.spl.mapv(|v| -v * 0.5));
        assert!(fit_mse(&a, &b) >= 0.0);
        assert!(fit_mse(&b, &a) >= 0.0);
    }
}
