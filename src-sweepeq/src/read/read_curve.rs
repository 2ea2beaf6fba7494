use std::path::Path;

use crate::{Curve, DataError};
use log::debug;

use super::read_text;

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Split a trimmed line on runs of commas and whitespace.
///
/// A leading separator yields an empty first field, so such a line never
/// parses as a data row.
fn split_fields(line: &str) -> Vec<&str> {
    let mut parts = line.split(is_separator);
    let mut fields = Vec::new();
    if let Some(first) = parts.next() {
        fields.push(first);
    }
    fields.extend(parts.filter(|p| !p.is_empty()));
    fields
}

fn parse_point(line: &str) -> Option<(f64, f64)> {
    let fields = split_fields(line.trim());
    if fields.len() < 2 {
        return None;
    }
    match (fields[0].parse::<f64>(), fields[1].parse::<f64>()) {
        (Ok(freq), Ok(spl)) => Some((freq, spl)),
        _ => None,
    }
}

fn parse_curve_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Curve {
    let mut frequencies = Vec::new();
    let mut spl_values = Vec::new();

    for (line_num, line) in lines.enumerate() {
        match parse_point(line) {
            Some((freq, spl)) => {
                frequencies.push(freq);
                spl_values.push(spl);
            }
            None => {
                if !line.trim().is_empty() {
                    debug!("skipping curve line {}: {:?}", line_num + 1, line);
                }
            }
        }
    }

    Curve::new(frequencies.into(), spl_values.into())
}

/// Parse a two-column `frequency level` text.
///
/// Columns are separated by commas and/or whitespace; extra columns are
/// ignored. Lines with fewer than two fields or non-numeric fields are
/// skipped. Points keep the file order.
pub fn parse_curve(text: &str) -> Curve {
    parse_curve_lines(text.lines())
}

/// Parse a target profile CSV: a header line followed by two-column rows.
pub fn parse_target_csv(text: &str) -> Curve {
    parse_curve_lines(text.lines().skip(1))
}

/// Read a two-column frequency response file
///
/// # Errors
/// Only when the file cannot be read.
pub fn read_curve(path: &Path) -> Result<Curve, DataError> {
    Ok(parse_curve(&read_text(path)?))
}

/// Read a target profile CSV (first line is a header)
pub fn read_target_csv(path: &Path) -> Result<Curve, DataError> {
    Ok(parse_target_csv(&read_text(path)?))
}
