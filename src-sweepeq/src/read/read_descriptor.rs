use std::path::Path;
use std::sync::LazyLock;

use crate::DataError;
use crate::iir::{BandKind, BandList, FilterBand};
use log::debug;
use regex::Regex;

use super::read_text;

static PREAMP_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)preamp:|db").expect("static regex is valid")
});

/// A parsed band descriptor with parse diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandDescriptor {
    /// Preamp and enabled bands
    pub band_list: BandList,
    /// `FILTER` lines that were enabled but missing a numeric Fc, Gain or Q
    pub skipped_lines: usize,
}

fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn band_kind(upper: &str) -> BandKind {
    if upper.contains("LSC") {
        BandKind::LowShelf
    } else if upper.contains("HSC") {
        BandKind::HighShelf
    } else {
        BandKind::Peaking
    }
}

fn parse_filter_line(line: &str, kind: BandKind) -> Option<FilterBand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (mut fc, mut gain, mut q) = (None, None, None);

    for pair in parts.windows(2) {
        let value = parse_value(pair[1]);
        if pair[0].eq_ignore_ascii_case("Fc") {
            fc = value;
        } else if pair[0].eq_ignore_ascii_case("Gain") {
            gain = value;
        } else if pair[0].eq_ignore_ascii_case("Q") {
            q = value;
        }
    }

    Some(FilterBand::new(kind, fc?, q?, gain?))
}

/// Parse a band descriptor and count the discarded `FILTER` lines.
///
/// Recognized lines:
/// - `Preamp: <x> dB` sets the preamp (last one wins, unparsable values are ignored)
/// - `Filter N: ON <type> Fc <f> Hz Gain <g> dB Q <q>` adds a band; `LSC` and
///   `HSC` anywhere in the line select a shelf, anything else is a peak
/// - `Filter` lines containing `OFF` are disabled and skipped
///
/// Everything else is ignored. Keywords are case-insensitive.
pub fn parse_band_descriptor_with_diagnostics(text: &str) -> BandDescriptor {
    let mut descriptor = BandDescriptor::default();

    for (line_num, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let upper = line.to_ascii_uppercase();

        if upper.starts_with("PREAMP:") {
            let value = PREAMP_NOISE.replace_all(line, "");
            match value.trim().parse::<f64>() {
                Ok(v) => descriptor.band_list.preamp_db = v,
                Err(_) => debug!("ignoring preamp on line {}: {:?}", line_num + 1, line),
            }
            continue;
        }

        if !upper.starts_with("FILTER") || upper.contains("OFF") {
            continue;
        }

        match parse_filter_line(line, band_kind(&upper)) {
            Some(band) => descriptor.band_list.bands.push(band),
            None => {
                descriptor.skipped_lines += 1;
                debug!("skipping filter line {}: {:?}", line_num + 1, line);
            }
        }
    }

    descriptor
}

/// Parse a band descriptor text into a preamp and the enabled bands.
///
/// Malformed lines are dropped silently; parsing never fails.
pub fn parse_band_descriptor(text: &str) -> BandList {
    parse_band_descriptor_with_diagnostics(text).band_list
}

/// Read a band descriptor file
///
/// # Errors
/// Only when the file cannot be read.
pub fn read_band_descriptor(path: &Path) -> Result<BandList, DataError> {
    Ok(parse_band_descriptor(&read_text(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTOEQ_OUTPUT: &str = "Preamp: -6.3 dB
Filter 1: ON LSC Fc 105 Hz Gain 4.5 dB Q 0.71
Filter 2: ON PK Fc 230 Hz Gain -3.2 dB Q 1.41
Filter 3: OFF PK Fc 1000 Hz Gain 3.0 dB Q 1.00
Filter 4: ON PK Fc 2400 Hz Gain 2.1 dB Q 2.50
Filter 5: ON HSC Fc 10000 Hz Gain -1.8 dB Q 0.71
";

    #[test]
    fn parses_autoeq_output() {
        let list = parse_band_descriptor(AUTOEQ_OUTPUT);
        assert_eq!(list.preamp_db, -6.3);
        assert_eq!(list.len(), 4);
        assert_eq!(list.bands[0], FilterBand::low_shelf(105.0, 0.71, 4.5));
        assert_eq!(list.bands[1], FilterBand::peaking(230.0, 1.41, -3.2));
        assert_eq!(list.bands[2], FilterBand::peaking(2400.0, 2.5, 2.1));
        assert_eq!(list.bands[3], FilterBand::high_shelf(10_000.0, 0.71, -1.8));
    }

    #[test]
    fn disabled_filter_produces_no_band() {
        let list = parse_band_descriptor("FILTER 1: OFF PK Fc 1000 Gain 3 Q 1");
        assert!(list.is_empty());
        assert_eq!(list.preamp_db, 0.0);
    }

    #[test]
    fn low_shelf_line_is_recognized() {
        let list = parse_band_descriptor("FILTER 1: ON LSC Fc 105 Gain 4.5 Q 0.71");
        assert_eq!(list.len(), 1);
        let band = list.bands[0];
        assert_eq!(band.kind, BandKind::LowShelf);
        assert_eq!(band.freq, 105.0);
        assert_eq!(band.db_gain, 4.5);
        assert_eq!(band.q, 0.71);
    }

    #[test]
    fn keywords_are_case_insensitive_and_unordered() {
        let list = parse_band_descriptor("filter 2: on hsc q 0.7 GAIN -2 fc 8000");
        assert_eq!(list.bands, vec![FilterBand::high_shelf(8000.0, 0.7, -2.0)]);

        let list = parse_band_descriptor("Filter 3: off PK Fc 100 Gain 1 Q 1");
        assert!(list.is_empty());
    }

    #[test]
    fn incomplete_lines_are_counted_and_dropped() {
        let text = "Filter 1: ON PK Fc 100 Hz Gain 2 dB\n\
                    Filter 2: ON PK Fc abc Hz Gain 2 dB Q 1\n\
                    Filter 3: ON PK Fc 300 Hz Gain 1 dB Q\n\
                    Filter 4: ON PK Fc 400 Hz Gain 1 dB Q 1\n";
        let descriptor = parse_band_descriptor_with_diagnostics(text);
        assert_eq!(descriptor.skipped_lines, 3);
        assert_eq!(
            descriptor.band_list.bands,
            vec![FilterBand::peaking(400.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn last_preamp_wins_and_bad_values_are_ignored() {
        let list = parse_band_descriptor("Preamp: -3 dB\nPREAMP: -4.5 DB\npreamp: loud\n");
        assert_eq!(list.preamp_db, -4.5);

        let list = parse_band_descriptor("Preamp: nothing\n");
        assert_eq!(list.preamp_db, 0.0);

        let list = parse_band_descriptor("Preamp:-2dB\n");
        assert_eq!(list.preamp_db, -2.0);
    }

    #[test]
    fn other_lines_are_ignored() {
        let text = "# AutoEQ\n\nChannel: all\nGraphicEQ: 20 0; 40 1\n";
        let descriptor = parse_band_descriptor_with_diagnostics(text);
        assert!(descriptor.band_list.is_empty());
        assert_eq!(descriptor.skipped_lines, 0);
    }
}
