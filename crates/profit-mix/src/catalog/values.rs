//! Cell-value normalization for exposure exports.
//!
//! Upstream exports mix representations freely: "51.43%", the fraction
//! 0.5143, and the already-scaled 51.43 all mean the same exposure.

/// Parse a percentage cell onto the 0-100 scale.
///
/// `"51.43%"` → 51.43, `"0.5143"` → 51.43, `"1.24"` → 1.24. A bare number
/// with 0 < |v| <= 1 is treated as a fraction and scaled by 100; a trailing
/// `%` suppresses fraction scaling. Thousands separators are stripped.
pub(crate) fn parse_percent(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    if let Some(stripped) = cleaned.strip_suffix('%') {
        return stripped.trim().parse::<f64>().ok().filter(|v| !v.is_nan());
    }

    let value = cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())?;
    if value != 0.0 && value.abs() <= 1.0 {
        Some(value * 100.0)
    } else {
        Some(value)
    }
}

/// Parse a plain numeric cell (sharpe ratios and service scores).
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}
