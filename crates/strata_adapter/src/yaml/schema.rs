//! Scalar resolution following the YAML 1.2 core schema.

use std::sync::LazyLock;

use regex::Regex;
use strata_ir::Scalar;
use yaml_rust2::parser::Tag;
use yaml_rust2::scanner::TScalarStyle;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("decimal pattern is a valid regex"));

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$")
        .expect("float pattern is a valid regex")
});

/// Handles the `!!` shorthand may be expanded to.
const CORE_TAG_HANDLES: [&str; 2] = ["tag:yaml.org,2002:", "!!"];

/// Resolves a scalar event into a typed value.
///
/// Only plain scalars are typed. Quoted and block scalars are always
/// strings, as are scalars carrying a tag outside the core set.
pub(crate) fn resolve(value: &str, style: TScalarStyle, tag: Option<&Tag>) -> Scalar {
    if !matches!(style, TScalarStyle::Plain) {
        return Scalar::from(value);
    }

    match tag {
        None => resolve_plain(value),
        Some(tag) if CORE_TAG_HANDLES.contains(&tag.handle.as_str()) => {
            resolve_tagged(value, &tag.suffix)
        }
        Some(_) => Scalar::from(value),
    }
}

fn resolve_tagged(value: &str, suffix: &str) -> Scalar {
    let resolved = match suffix {
        "str" => return Scalar::from(value),
        "null" => resolve_null(value),
        "bool" => resolve_bool(value),
        "int" => resolve_int(value),
        "float" => resolve_float(value),
        _ => None,
    };
    resolved.unwrap_or_else(|| Scalar::from(value))
}

fn resolve_plain(value: &str) -> Scalar {
    resolve_null(value)
        .or_else(|| resolve_bool(value))
        .or_else(|| resolve_int(value))
        .or_else(|| resolve_float(value))
        .unwrap_or_else(|| Scalar::from(value))
}

fn resolve_null(value: &str) -> Option<Scalar> {
    matches!(value, "" | "~" | "null" | "Null" | "NULL").then_some(Scalar::Null)
}

fn resolve_bool(value: &str) -> Option<Scalar> {
    match value {
        "true" | "True" | "TRUE" => Some(Scalar::Bool(true)),
        "false" | "False" | "FALSE" => Some(Scalar::Bool(false)),
        _ => None,
    }
}

fn resolve_int(value: &str) -> Option<Scalar> {
    if let Some(octal) = value.strip_prefix("0o") {
        return radix(octal, 8);
    }
    if let Some(hex) = value.strip_prefix("0x") {
        return radix(hex, 16);
    }
    if !DECIMAL.is_match(value) {
        return None;
    }
    match value.parse::<i64>() {
        Ok(int) => Some(Scalar::Integer(int)),
        // Too wide for i64; keep the magnitude.
        Err(_) => value.parse::<f64>().ok().map(Scalar::Float),
    }
}

fn radix(digits: &str, radix: u32) -> Option<Scalar> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok().map(Scalar::Integer)
}

fn resolve_float(value: &str) -> Option<Scalar> {
    let (sign, body) = match value.as_bytes().first() {
        Some(b'-') => (-1.0, &value[1..]),
        Some(b'+') => (1.0, &value[1..]),
        _ => (1.0, value),
    };
    match body {
        ".inf" | ".Inf" | ".INF" => return Some(Scalar::Float(sign * f64::INFINITY)),
        // NaN is kept; documents holding it compare equal only once serialized.
        ".nan" | ".NaN" | ".NAN" if body.len() == value.len() => {
            return Some(Scalar::Float(f64::NAN));
        }
        _ => {}
    }
    if !FLOAT.is_match(value) {
        return None;
    }
    value.parse::<f64>().ok().map(Scalar::number)
}
