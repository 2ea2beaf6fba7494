use crate::Curve;
use ndarray::Array1;

/// Create a logarithmic frequency grid
///
/// `n_points` values evenly spaced in log10 between `f_min` and `f_max`,
/// both included.
pub fn create_log_frequency_grid(n_points: usize, f_min: f64, f_max: f64) -> Array1<f64> {
    Array1::logspace(10.0, f_min.log10(), f_max.log10(), n_points)
}

/// Interpolate a curve onto `freq_out`, linearly in log10(frequency)
///
/// Points below (above) the source range take the first (last) source level;
/// a frequency equal to a source frequency returns its level unchanged.
/// Source frequencies must be strictly increasing. An empty source gives zeros.
///
/// # Arguments
/// * `source` - Curve to resample
/// * `freq_out` - Target frequency grid
///
/// # Returns
/// * Interpolated levels on `freq_out`
pub fn interpolate_log_space(source: &Curve, freq_out: &Array1<f64>) -> Array1<f64> {
    let n_in = source.len();
    if n_in == 0 {
        return Array1::zeros(freq_out.len());
    }

    let log_freq_in: Vec<f64> = source.freq.iter().map(|f| f.log10()).collect();

    freq_out.mapv(|f| {
        let log_f = f.log10();
        match log_freq_in.binary_search_by(|x| x.total_cmp(&log_f)) {
            Ok(idx) => source.spl[idx],
            Err(0) => source.spl[0],
            Err(ins) if ins >= n_in => source.spl[n_in - 1],
            Err(ins) => {
                let (x0, x1) = (log_freq_in[ins - 1], log_freq_in[ins]);
                let (y0, y1) = (source.spl[ins - 1], source.spl[ins]);
                let t = (log_f - x0) / (x1 - x0);
                y0 + t * (y1 - y0)
            }
        }
    })
}

/// Interpolate a curve at one frequency, linearly in frequency
///
/// Outside the source range the first or last level is returned. An empty
/// source gives 0.
pub fn interpolate_linear_at(freq: f64, source: &Curve) -> f64 {
    let n = source.len();
    if n == 0 {
        return 0.0;
    }
    if freq <= source.freq[0] {
        return source.spl[0];
    }
    if freq >= source.freq[n - 1] {
        return source.spl[n - 1];
    }

    // Find the two points that bracket the target frequency
    for j in 1..n {
        if source.freq[j] >= freq {
            if source.freq[j] == freq {
                return source.spl[j];
            }
            let (f0, f1) = (source.freq[j - 1], source.freq[j]);
            let (y0, y1) = (source.spl[j - 1], source.spl[j]);
            let t = (freq - f0) / (f1 - f0);
            return y0 + t * (y1 - y0);
        }
    }

    // NaN never brackets
    source.spl[0]
}

/// Linear interpolation function
///
/// # Arguments
/// * `target_freqs` - Target frequencies to interpolate to
/// * `source` - Source curve
///
/// # Returns
/// * Interpolated levels at target frequencies
pub fn interpolate(target_freqs: &Array1<f64>, source: &Curve) -> Array1<f64> {
    target_freqs.mapv(|f| interpolate_linear_at(f, source))
}
