//! Route and line colour helpers.

/// Colour used when the upstream payload carries no usable colour.
pub const FALLBACK_HEX: &str = "#CCCCCC";

/// Normalize a hex colour to `#rrggbb` form.
///
/// BART sends route colours both with and without the leading `#`.
/// Blank input yields [`FALLBACK_HEX`]. Case is preserved.
pub fn normalize_hex(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "#" {
        return FALLBACK_HEX.to_string();
    }
    if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    }
}

/// Keep an upstream colour as sent, or [`FALLBACK_HEX`] when it is blank.
///
/// Both decoding stages run colours through this, so a missing colour
/// looks the same whichever stage produced the record.
pub fn hex_or_fallback(raw: String) -> String {
    if raw.trim().is_empty() {
        FALLBACK_HEX.to_string()
    } else {
        raw
    }
}

/// Compare two hex colours, ignoring case and a missing `#`.
///
/// Blank colours and [`FALLBACK_HEX`] stand for "no colour", so they never
/// match anything, including each other.
pub fn same_hex(a: &str, b: &str) -> bool {
    let placeholder = FALLBACK_HEX.trim_start_matches('#');
    let a = a.trim().trim_start_matches('#');
    let b = b.trim().trim_start_matches('#');
    !a.is_empty() && !a.eq_ignore_ascii_case(placeholder) && a.eq_ignore_ascii_case(b)
}
