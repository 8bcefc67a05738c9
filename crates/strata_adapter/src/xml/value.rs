//! Value inference for XML text content and attribute values.
//!
//! XML carries no types, so numbers and booleans are recognized from their
//! lexical form. The rules are conservative: anything that would not print
//! back the way it was written stays a string.

use std::sync::LazyLock;

use regex::Regex;
use strata_ir::Scalar;

/// Text containing a `+` followed by ten digits, e.g. phone numbers.
static SKIP_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d{10}").expect("skip pattern is a valid regex"));

/// Sign, leading zeros, then the significant part.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\-+])?(0*)(\.[0-9]+([eE]-?[0-9]+)?|[0-9]+(\.[0-9]+)?([eE]-?[0-9]+)?)$")
        .expect("number pattern is a valid regex")
});

/// Infers a scalar from raw XML text.
///
/// The input is trimmed first; when no other type applies the trimmed
/// string is returned.
///
/// ```rust
/// use strata_adapter::xml::infer_scalar;
/// use strata_ir::Scalar;
///
/// assert_eq!(infer_scalar(" 6.00 "), Scalar::Integer(6));
/// assert_eq!(infer_scalar("006"), Scalar::from("006"));
/// assert_eq!(infer_scalar("true"), Scalar::Bool(true));
/// ```
pub fn infer_scalar(raw: &str) -> Scalar {
    let trimmed = raw.trim();
    match trimmed {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => infer_number(trimmed).unwrap_or_else(|| Scalar::from(trimmed)),
    }
}

fn infer_number(trimmed: &str) -> Option<Scalar> {
    if SKIP_LIKE.is_match(trimmed) {
        return None;
    }
    if trimmed == "0" {
        return Some(Scalar::Integer(0));
    }
    // Hex never matches the pattern below; exponents are rejected outright.
    if trimmed.contains(['e', 'E']) {
        return None;
    }

    let caps = NUMBER.captures(trimmed)?;
    let signed = caps.get(1).is_some();
    let has_leading_zeros = caps.get(2).is_some_and(|m| !m.is_empty());
    let significant = trim_zeros(caps.get(3).map_or("", |m| m.as_str()));

    if has_leading_zeros {
        let dot_at = if signed { 2 } else { 1 };
        if trimmed.as_bytes().get(dot_at) != Some(&b'.') {
            return None;
        }
    }

    let num: f64 = trimmed.parse().ok()?;
    let printed = canonical(num)?;

    let round_trips = if trimmed.contains('.') {
        (printed == "0" && significant.is_empty())
            || printed == significant
            || (signed && printed == format!("-{significant}"))
    } else {
        trimmed == printed || (signed && trimmed[1..] == printed)
    };

    round_trips.then(|| Scalar::number(num))
}

/// Prints a number the way a JavaScript engine would, or `None` when that
/// form needs an exponent.
fn canonical(num: f64) -> Option<String> {
    let magnitude = num.abs();
    if !num.is_finite() || magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        return None;
    }
    if num == 0.0 {
        return Some("0".to_string());
    }
    Some(num.to_string())
}

/// Drops trailing fractional zeros: `6.00` → `6`, `.50` → `0.5`.
fn trim_zeros(digits: &str) -> String {
    if !digits.contains('.') {
        return digits.to_string();
    }
    let stripped = digits.trim_end_matches('0');
    if stripped == "." {
        "0".to_string()
    } else if let Some(rest) = stripped.strip_suffix('.') {
        rest.to_string()
    } else if stripped.starts_with('.') {
        format!("0{stripped}")
    } else {
        stripped.to_string()
    }
}
