//! Lenient numeric coercion for request fields and path segments.
//!
//! Every field goes through [`loose_number`], which reads a JSON value the way a dynamically
//! typed client would: booleans count as 0/1, blank strings as 0, `0x`/`0o`/`0b` prefixes are
//! honoured and a one-element array stands for its element. On top of that, the integer policy
//! is "default to unset": anything that is not clearly an integer becomes `None` instead of being
//! rejected. Callers that need a hard failure (path ids) turn the `None` into their own error.

use serde_json::Value as JsonValue;

// Bounds of the f64 values that convert to i64 without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Normalizes a nullable integer field.
///
/// Missing, `null` and `""` all mean "unset". Other values become their integer value when they
/// represent one (`7`, `"7"`, `" 7 "`, `7.0`, `"1e3"`, `"0x10"`, `true`, `"   "`, `[5]`), and
/// `None` otherwise (`"1.5"`, `"abc"`, `[1, 2]`, objects).
pub fn normalize_nullable_int(raw: Option<&JsonValue>) -> Option<i64> {
    match raw {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) if s.is_empty() => None,
        Some(v) => json_to_integer(v),
    }
}

/// Integer value of a JSON value, if it coerces to one.
pub fn json_to_integer(v: &JsonValue) -> Option<i64> {
    loose_number(v).and_then(integral_f64)
}

/// Parses a textual integer with the same rules as string fields.
pub fn parse_integer(s: &str) -> Option<i64> {
    string_to_number(s).and_then(integral_f64)
}

/// Numeric reading of any JSON value. `None` stands for "not a number".
///
/// `null` is 0, booleans are 0/1, strings follow [`string_to_number`], arrays coerce through
/// their single element (`[]` is 0, two or more elements are not a number), objects are not a
/// number.
pub fn loose_number(v: &JsonValue) -> Option<f64> {
    match v {
        JsonValue::Null => Some(0.0),
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => string_to_number(s),
        JsonValue::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [item] => element_number(item),
            _ => None,
        },
        JsonValue::Object(_) => None,
    }
}

// An array element is read through its textual form: `[null]` is "" and `[true]` is "true".
fn element_number(item: &JsonValue) -> Option<f64> {
    match item {
        JsonValue::Null => Some(0.0),
        JsonValue::Bool(_) | JsonValue::Object(_) => None,
        other => loose_number(other),
    }
}

/// Numeric reading of a string.
///
/// Surrounding whitespace is ignored and a blank string is 0. Accepts decimal literals with an
/// optional sign and exponent, unsigned `0x`/`0o`/`0b` integers, and `Infinity` with an optional
/// sign.
pub fn string_to_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Rust's float grammar also takes `inf`/`nan`; only plain decimal literals are numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

fn integral_f64(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_null_and_empty_string_are_equivalent() {
        assert_eq!(normalize_nullable_int(None), None);
        assert_eq!(normalize_nullable_int(Some(&JsonValue::Null)), None);
        assert_eq!(normalize_nullable_int(Some(&json!(""))), None);
    }

    #[test]
    fn integers_are_widened_from_any_wire_shape() {
        assert_eq!(normalize_nullable_int(Some(&json!(42))), Some(42));
        assert_eq!(normalize_nullable_int(Some(&json!("42"))), Some(42));
        assert_eq!(normalize_nullable_int(Some(&json!(" 42 "))), Some(42));
        assert_eq!(normalize_nullable_int(Some(&json!(-3))), Some(-3));
        assert_eq!(normalize_nullable_int(Some(&json!(3.0))), Some(3));
        assert_eq!(normalize_nullable_int(Some(&json!("3.0"))), Some(3));
        assert_eq!(normalize_nullable_int(Some(&json!("1e3"))), Some(1000));
    }

    #[test]
    fn loosely_typed_values_coerce_like_numbers() {
        assert_eq!(normalize_nullable_int(Some(&json!(true))), Some(1));
        assert_eq!(normalize_nullable_int(Some(&json!(false))), Some(0));
        assert_eq!(normalize_nullable_int(Some(&json!("   "))), Some(0));
        assert_eq!(normalize_nullable_int(Some(&json!("0x10"))), Some(16));
        assert_eq!(normalize_nullable_int(Some(&json!("0o17"))), Some(15));
        assert_eq!(normalize_nullable_int(Some(&json!("0b101"))), Some(5));
        assert_eq!(normalize_nullable_int(Some(&json!([5]))), Some(5));
        assert_eq!(normalize_nullable_int(Some(&json!(["7"]))), Some(7));
        assert_eq!(normalize_nullable_int(Some(&json!([[8]]))), Some(8));
        assert_eq!(normalize_nullable_int(Some(&json!([]))), Some(0));
        assert_eq!(normalize_nullable_int(Some(&json!([null]))), Some(0));
    }

    #[test]
    fn non_integers_silently_become_null() {
        for v in [
            json!("1.5"),
            json!(1.5),
            json!("abc"),
            json!("NaN"),
            json!("inf"),
            json!("Infinity"),
            json!("0x"),
            json!("-0x10"),
            json!("0xZZ"),
            json!([1, 2]),
            json!([true]),
            json!({ "id": 1 }),
            json!(u64::MAX),
            json!("1e300"),
        ] {
            assert_eq!(normalize_nullable_int(Some(&v)), None, "value: {v}");
        }
    }

    #[test]
    fn string_numbers() {
        assert_eq!(string_to_number(" \t"), Some(0.0));
        assert_eq!(string_to_number("-2.5e1"), Some(-25.0));
        assert_eq!(string_to_number(".5"), Some(0.5));
        assert_eq!(string_to_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(string_to_number("0XfF"), Some(255.0));
        assert_eq!(string_to_number("e5"), None);
        assert_eq!(string_to_number("12abc"), None);
        assert_eq!(string_to_number("nan"), None);
    }

    #[test]
    fn parse_integer_handles_path_segments() {
        assert_eq!(parse_integer("17"), Some(17));
        assert_eq!(parse_integer("0x11"), Some(17));
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("2.5"), None);
    }
}
