#![doc = include_str!("../README.md")]

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};
use std::fmt;

/// Floor added to every magnitude before taking `log10`
pub const EPSILON: f64 = 1.0e-12;

/// Sample rate used by the measurement chain
pub const SRATE: f64 = 48000.0;

/// Kinds of parametric EQ bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandKind {
    /// Peaking (bell) filter
    Peaking,
    /// Low-shelf filter
    LowShelf,
    /// High-shelf filter
    HighShelf,
}

impl BandKind {
    /// Returns the code used in band descriptor files (e.g., "LSC").
    pub fn short_name(&self) -> &'static str {
        match self {
            BandKind::Peaking => "PK",
            BandKind::LowShelf => "LSC",
            BandKind::HighShelf => "HSC",
        }
    }

    /// Returns the name used when listing bands (e.g., "LOW SHELF").
    pub fn long_name(&self) -> &'static str {
        match self {
            BandKind::Peaking => "PEAKING",
            BandKind::LowShelf => "LOW SHELF",
            BandKind::HighShelf => "HIGH SHELF",
        }
    }
}

/// One parametric EQ band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterBand {
    /// The type of band
    pub kind: BandKind,
    /// Center (or corner) frequency in Hz
    pub freq: f64,
    /// Q factor, unused by the shelves
    pub q: f64,
    /// Gain in dB
    pub db_gain: f64,
}

/// Second-order section in `z^-1`, scaled by `gain` after the division.
#[derive(Debug, Clone, Copy)]
struct Section {
    num: [f64; 3],
    den: [f64; 3],
    gain: f64,
}

impl Section {
    fn magnitude(&self, f: f64, srate: f64) -> f64 {
        let w = 2.0 * PI * f / srate;
        let z_inv = Complex64::new(w.cos(), -w.sin());
        let z_inv2 = z_inv * z_inv;
        let num = self.num[0] + z_inv * self.num[1] + z_inv2 * self.num[2];
        let den = self.den[0] + z_inv * self.den[1] + z_inv2 * self.den[2];
        (num / den * self.gain).norm()
    }
}

impl FilterBand {
    /// Creates a band.
    pub fn new(kind: BandKind, freq: f64, q: f64, db_gain: f64) -> Self {
        FilterBand {
            kind,
            freq,
            q,
            db_gain,
        }
    }

    /// Shorthand for a peaking band.
    pub fn peaking(freq: f64, q: f64, db_gain: f64) -> Self {
        Self::new(BandKind::Peaking, freq, q, db_gain)
    }

    /// Shorthand for a low-shelf band.
    pub fn low_shelf(freq: f64, q: f64, db_gain: f64) -> Self {
        Self::new(BandKind::LowShelf, freq, q, db_gain)
    }

    /// Shorthand for a high-shelf band.
    pub fn high_shelf(freq: f64, q: f64, db_gain: f64) -> Self {
        Self::new(BandKind::HighShelf, freq, q, db_gain)
    }

    fn section(&self, srate: f64) -> Section {
        let g = 10.0_f64.powf(self.db_gain / 20.0);
        let sqrt_g = g.sqrt();

        match self.kind {
            BandKind::Peaking => {
                // half-bandwidth pre-warp, the gain at `freq` is exactly `g`
                let bandwidth = self.freq / self.q;
                let t = (bandwidth / 2.0 * (PI / srate)).tan();
                let cos_wc = (2.0 * PI * self.freq / srate).cos();
                Section {
                    num: [sqrt_g + g * t, -2.0 * sqrt_g * cos_wc, sqrt_g - g * t],
                    den: [sqrt_g + t, -2.0 * sqrt_g * cos_wc, sqrt_g - t],
                    gain: 1.0,
                }
            }
            BandKind::LowShelf | BandKind::HighShelf => {
                let omega_c = (PI * self.freq / srate).tan();
                let omega2 = omega_c * omega_c;
                let omega_g = SQRT_2 * omega_c * g.powf(0.25);

                let boosted = [
                    sqrt_g * omega2 + omega_g + 1.0,
                    2.0 * (sqrt_g * omega2 - 1.0),
                    sqrt_g * omega2 - omega_g + 1.0,
                ];
                let plain = [
                    sqrt_g + omega_g + omega2,
                    2.0 * (omega2 - sqrt_g),
                    sqrt_g - omega_g + omega2,
                ];

                let (num, den) = if self.kind == BandKind::LowShelf {
                    (boosted, plain)
                } else {
                    (plain, boosted)
                };
                Section {
                    num,
                    den,
                    gain: sqrt_g,
                }
            }
        }
    }

    /// Magnitude response (linear) at a single frequency `f`.
    pub fn result(&self, f: f64, srate: f64) -> f64 {
        self.section(srate).magnitude(f, srate)
    }

    /// Response in dB at a single frequency `f`.
    pub fn log_result(&self, f: f64, srate: f64) -> f64 {
        to_db(self.result(f, srate))
    }

    /// Response in dB for a vector of frequencies.
    pub fn response_db(&self, freqs: &Array1<f64>, srate: f64) -> Array1<f64> {
        let section = self.section(srate);
        freqs.mapv(|f| to_db(section.magnitude(f, srate)))
    }
}

fn to_db(magnitude: f64) -> f64 {
    if magnitude.is_nan() {
        // 0/0 at a pathological point
        return 20.0 * EPSILON.log10();
    }
    20.0 * (magnitude + EPSILON).log10()
}

/// Display like a band listing: `PEAKING @ 1000 Hz   Gain: 6.0 dB   Q: 1.40`
impl fmt::Display for FilterBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {:.0} Hz   Gain: {:.1} dB   Q: {:.2}",
            self.kind.long_name(),
            self.freq,
            self.db_gain,
            self.q
        )
    }
}

/// Ordered bands plus a global preamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandList {
    /// Flat offset in dB applied after the cascade
    pub preamp_db: f64,
    /// Bands in descriptor order
    pub bands: Vec<FilterBand>,
}

impl BandList {
    /// Creates a band list.
    pub fn new(preamp_db: f64, bands: Vec<FilterBand>) -> Self {
        BandList { preamp_db, bands }
    }

    /// Number of bands
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// True when the list holds no band (the preamp may still be set).
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Iterate over the bands in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterBand> {
        self.bands.iter()
    }
}

/// Curves produced by [`combine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Response of the band cascade alone (no preamp)
    pub eq_curve: Array1<f64>,
    /// Measured response plus the cascade, without preamp
    pub corrected: Array1<f64>,
    /// `corrected` shifted by the preamp
    pub with_preamp: Array1<f64>,
}

/// Compute the cascade of `bands` in dB on a frequency grid.
///
/// Band responses are multiplied as linear gains, so the order of `bands`
/// has no effect. With no band the result is 0 dB up to the [`EPSILON`] floor.
///
/// # Arguments
/// * `freqs` - Frequency points for evaluation (Hz)
/// * `bands` - Bands to cascade
/// * `srate` - Sample rate in Hz
pub fn eq_curve_db(freqs: &Array1<f64>, bands: &[FilterBand], srate: f64) -> Array1<f64> {
    let mut linear = Array1::<f64>::ones(freqs.len());
    for band in bands {
        let gain = band
            .response_db(freqs, srate)
            .mapv(|db| 10.0_f64.powf(db / 20.0));
        linear *= &gain;
    }
    linear.mapv(to_db)
}

/// Apply a band list to a measured response sampled on `freqs`.
///
/// # Arguments
/// * `freqs` - Frequency grid (Hz)
/// * `measured_db` - Measured levels on the same grid
/// * `band_list` - Bands and preamp
/// * `srate` - Sample rate in Hz
///
/// # Panics
/// If `freqs` and `measured_db` have different lengths.
pub fn combine(
    freqs: &Array1<f64>,
    measured_db: &Array1<f64>,
    band_list: &BandList,
    srate: f64,
) -> Correction {
    assert_eq!(
        freqs.len(),
        measured_db.len(),
        "frequency grid and measured levels differ in length"
    );
    let eq_curve = eq_curve_db(freqs, &band_list.bands, srate);
    let corrected = measured_db + &eq_curve;
    let with_preamp = &corrected + band_list.preamp_db;
    Correction {
        eq_curve,
        corrected,
        with_preamp,
    }
}

/// Format a band list as a descriptor file
///
/// The output uses the `Preamp:` / `Filter N: ON ...` line format and keeps
/// the band order. Values are printed without rounding so the text parses
/// back to the same band list.
///
/// # Arguments
/// * `comment` - Comment written on the first line (skipped when empty)
/// * `band_list` - Bands and preamp
pub fn format_band_descriptor(comment: &str, band_list: &BandList) -> String {
    let mut res = Vec::new();
    if !comment.is_empty() {
        res.push(comment.to_string());
    }
    res.push(format!("Preamp: {} dB", band_list.preamp_db));
    res.push(String::new());

    for (i, band) in band_list.iter().enumerate() {
        res.push(format!(
            "Filter {:2}: ON {} Fc {} Hz Gain {:+} dB Q {}",
            i + 1,
            band.kind.short_name(),
            band.freq,
            band.db_gain,
            band.q
        ));
    }

    res.push(String::new());
    res.join("\n")
}
