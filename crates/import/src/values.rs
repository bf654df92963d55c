//! Scalar sanitizers applied to every cell pulled from a provider sheet.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

pub const NULL_SENTINEL: &str = "(null)";

/// Leading decimal literal, as accepted by lenient spreadsheet number parsing
/// (`"12.5 L"` reads as 12.5).
fn re_leading_number() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("invalid regex")
    })
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("The expected string value {0} is not a string and could not be converted")]
    TypeConversion(String),
    #[error("The numeric value {0} is not a valid number")]
    NumericParse(String),
}

/// Converts a cell to text and truncates it to `max_len` characters.
///
/// Over-length input is cut silently. Null, arrays and objects have no
/// scalar text form and fail with [`ValueError::TypeConversion`].
pub fn parse_string(value: &Value, max_len: usize) -> Result<String, ValueError> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => return Err(ValueError::TypeConversion(other.to_string())),
    };
    Ok(truncate(text, max_len))
}

fn truncate(mut s: String, max_len: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max_len) {
        s.truncate(idx);
    }
    s
}

/// Cleans a raw text cell: surrounding whitespace is trimmed, one enclosing
/// pair of double quotes is removed and the `(null)` sentinel becomes empty.
///
/// Repeated calls are stable unless the unquoted text is itself wrapped in
/// quotes, in which case each call peels one more pair.
pub fn parse_string_value(s: &str) -> String {
    let trimmed = s.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim();
    if unquoted == NULL_SENTINEL {
        String::new()
    } else {
        unquoted.to_string()
    }
}

/// Reads a cell as a float. Zero and negative values are valid; only input
/// with no leading number fails.
pub fn parse_float_value(value: &Value) -> Result<f64, ValueError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    parsed
        .filter(|f| !f.is_nan())
        .ok_or_else(|| ValueError::NumericParse(value.to_string()))
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    if let Some(m) = re_leading_number().find(s) {
        return m.as_str().parse().ok();
    }
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.starts_with("Infinity") {
        let negative = s.starts_with('-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    None
}

/// The canonical "is this field populated" check: absent, null or zero-length.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    }
}

pub fn is_empty_str(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    // ── parse_string ──────────────────────────────────────────────────────────

    #[test]
    fn parse_string_passes_short_text_through() {
        assert_eq!(parse_string(&json!("ABC-123"), 10).unwrap(), "ABC-123");
    }

    #[test]
    fn parse_string_truncates_silently() {
        assert_eq!(parse_string(&json!("1HGCM82633A004352"), 5).unwrap(), "1HGCM");
    }

    #[test]
    fn parse_string_truncates_on_char_boundaries() {
        assert_eq!(parse_string(&json!("Zürich Süd"), 2).unwrap(), "Zü");
    }

    #[test]
    fn parse_string_converts_numbers_and_bools() {
        assert_eq!(parse_string(&json!(4711), 10).unwrap(), "4711");
        assert_eq!(parse_string(&json!(12.5), 10).unwrap(), "12.5");
        assert_eq!(parse_string(&json!(true), 10).unwrap(), "true");
    }

    #[test]
    fn parse_string_rejects_null_and_containers() {
        assert!(matches!(
            parse_string(&Value::Null, 10),
            Err(ValueError::TypeConversion(_))
        ));
        assert!(matches!(
            parse_string(&json!([1, 2]), 10),
            Err(ValueError::TypeConversion(_))
        ));
    }

    #[test]
    fn parse_string_zero_length() {
        assert_eq!(parse_string(&json!("abc"), 0).unwrap(), "");
    }

    // ── parse_string_value ────────────────────────────────────────────────────

    #[test]
    fn parse_string_value_quoted_sentinel_is_empty() {
        assert_eq!(parse_string_value("\"(null)\""), "");
        assert_eq!(parse_string_value("(null)"), "");
    }

    #[test]
    fn parse_string_value_strips_quotes() {
        assert_eq!(parse_string_value("\"abc\""), "abc");
    }

    #[test]
    fn parse_string_value_trims() {
        assert_eq!(parse_string_value("  xyz  "), "xyz");
        assert_eq!(parse_string_value("  \" xyz \"  "), "xyz");
    }

    #[test]
    fn parse_string_value_needs_both_quotes() {
        assert_eq!(parse_string_value("\"abc"), "\"abc");
        assert_eq!(parse_string_value("abc\""), "abc\"");
        assert_eq!(parse_string_value("\""), "\"");
    }

    #[test]
    fn parse_string_value_strips_one_layer_per_call() {
        let once = parse_string_value("\"\"abc\"\"");
        assert_eq!(once, "\"abc\"");
        assert_eq!(parse_string_value(&once), "abc");
    }

    proptest! {
        #[test]
        fn parse_string_value_is_idempotent(s in "[ a-zA-Z0-9()\\-]{0,16}", quoted in any::<bool>()) {
            let input = if quoted { format!("\"{s}\"") } else { s };
            let once = parse_string_value(&input);
            prop_assert_eq!(parse_string_value(&once), once);
        }
    }

    // ── parse_float_value ─────────────────────────────────────────────────────

    #[test]
    fn parse_float_value_rejects_text() {
        assert!(matches!(
            parse_float_value(&json!("abc")),
            Err(ValueError::NumericParse(_))
        ));
        assert!(parse_float_value(&json!("")).is_err());
        assert!(parse_float_value(&Value::Null).is_err());
    }

    #[test]
    fn parse_float_value_zero_is_valid() {
        assert_eq!(parse_float_value(&json!("0")).unwrap(), 0.0);
        assert_eq!(parse_float_value(&json!(0)).unwrap(), 0.0);
    }

    #[test]
    fn parse_float_value_negative_and_decimal() {
        assert_eq!(parse_float_value(&json!("-12.75")).unwrap(), -12.75);
        assert_eq!(parse_float_value(&json!(".5")).unwrap(), 0.5);
        assert_eq!(parse_float_value(&json!("1e3")).unwrap(), 1000.0);
    }

    #[test]
    fn parse_float_value_reads_leading_number() {
        assert_eq!(parse_float_value(&json!("  45.2 L")).unwrap(), 45.2);
        assert!(parse_float_value(&json!("L 45.2")).is_err());
    }

    #[test]
    fn parse_float_value_infinity() {
        assert_eq!(parse_float_value(&json!("-Infinity")).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn parse_float_takes_a_single_sign() {
        assert_eq!(parse_float_value(&json!("+Infinity")).unwrap(), f64::INFINITY);
        for s in ["+-Infinity", "--Infinity", "-+1", "++2"] {
            assert!(
                matches!(parse_float_value(&json!(s)), Err(ValueError::NumericParse(_))),
                "{s:?}"
            );
        }
    }

    // ── is_empty ─────────────────────────────────────────────────────────────

    #[test]
    fn is_empty_cases() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&Value::Null)));
        assert!(is_empty(Some(&json!(""))));
        assert!(is_empty(Some(&json!([]))));
        assert!(!is_empty(Some(&json!("A"))));
        assert!(!is_empty(Some(&json!(0))));
        assert!(is_empty_str(None));
        assert!(is_empty_str(Some("")));
        assert!(!is_empty_str(Some("x")));
    }
}
