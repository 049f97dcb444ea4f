//! Fixed-precision number formatting for reported figures

/// Format `value` with exactly `decimals` digits after the point.
///
/// Negative zero (e.g. `-0.0001` at two decimals) is reported as `"0.00"`
/// so magnitudes never carry a stray sign.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => formatted,
    }
}

/// Round `value` to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
