use crate::Curve;

/// Reference frequency used to align a measurement
pub const NORMALIZE_FREQ: f64 = 1000.0;

/// Shift a curve so that its level at the sample closest to `f_ref` is 0 dB.
///
/// The first sample wins when two are equally close. An empty curve is
/// returned unchanged.
pub fn normalize_at(curve: &Curve, f_ref: f64) -> Curve {
    let mut best = f64::INFINITY;
    let mut idx = None;
    for (i, f) in curve.freq.iter().enumerate() {
        let d = (f - f_ref).abs();
        if d < best {
            best = d;
            idx = Some(i);
        }
    }

    match idx {
        Some(i) => {
            let offset = curve.spl[i];
            Curve::new(curve.freq.clone(), &curve.spl - offset)
        }
        None => curve.clone(),
    }
}
