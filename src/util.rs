// Utility helpers for parsing and formatting numbers.
//
// Delivery exports are hand-edited spreadsheets, so every numeric read goes
// through `parse_number` and every numeric write through one of the
// formatters below.
use num_format::{Locale, ToFormattedString};

/// Parse a cell's text into `f64` while being forgiving about formatting
/// issues that are common in spreadsheet exports.
///
/// - Trims whitespace.
/// - Rejects values containing letters other than an exponent marker, so
///   `N/A`, `NaN` and `inf` never sneak through as numbers.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a computed value for the output table. Uses the shortest
/// representation that parses back to the same `f64`.
pub fn format_cell_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid writing "-0".
        return "0".to_string();
    }
    format!("{}", n)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators
    // (e.g., `1,234,567.89`).
    if !n.is_finite() {
        return format!("{}", n);
    }
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: u64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// `part / whole` as a percentage, `0` when the ratio is undefined.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() {
        return 0.0;
    }
    let pct = part / whole * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}
