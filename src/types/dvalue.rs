//! Data value representing a single cell of a dataset column
//!
//! Dataset values and range bounds are compared using loose numeric coercion: numbers compare as
//! they are, numeric text is parsed, and anything that cannot be read as a number becomes NaN so
//! that it never falls inside a range.

/// A value of any JSON type.
/// This is an alias of the Value type from serde_json. Extracted cells are returned to the caller
/// exactly as they appear in the dataset.
pub type DValue = serde_json::Value;

/// Coerce a [DValue] to an f64.
///
/// * Numbers are converted directly.
/// * Strings are parsed with [coerce_str].
/// * Booleans are 1 or 0.
/// * Null, arrays and objects are NaN.
pub fn coerce(value: &DValue) -> f64 {
    match value {
        DValue::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        DValue::String(text) => coerce_str(text),
        DValue::Bool(true) => 1.0,
        DValue::Bool(false) => 0.0,
        DValue::Null | DValue::Array(_) | DValue::Object(_) => f64::NAN,
    }
}

/// Coerce text to an f64.
///
/// Surrounding whitespace is ignored and empty text is zero. `Infinity` may be signed. Integers
/// prefixed with `0x`, `0o` or `0b` are read in that radix. Any other decimal literal is parsed
/// normally, and anything else is NaN.
pub fn coerce_str(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => (),
    }
    if let Some(radix) = radix_prefix(text) {
        return parse_radix(&text[2..], radix);
    }
    // f64::from_str also accepts "inf" and "nan" in any case, which are not numbers here.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns the radix for a `0x`, `0o` or `0b` prefix.
fn radix_prefix(text: &str) -> Option<u32> {
    let prefix = text.get(..2)?;
    match prefix {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

/// Parse unsigned digits in a radix, accumulating into an f64 so that large values lose precision
/// rather than overflowing.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |acc, c| {
            c.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}
