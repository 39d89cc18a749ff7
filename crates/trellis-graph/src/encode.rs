//! Cypher literal encoding for property values.
//!
//! This is the canonical textual form of a value: what `PropertySet`
//! renders in its literal form and what statement logging shows. Values
//! embedded in executed statements travel as bound parameters instead, but
//! both forms are gated by the same supportability rules here.

use trellis_core::Value;

/// A value with no Cypher literal form.
///
/// Recoverable at the property-map level: the offending key is warned about
/// and dropped rather than failing the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported value type: {0}")]
pub struct UnsupportedValue(pub &'static str);

/// Render a property value as a Cypher literal.
///
/// `Null` is normalized to the empty string literal `""` — the null/empty
/// distinction is not preserved. Strings are double-quoted with quotes,
/// backslashes, and control characters escaped. Lists must hold scalars of
/// a single kind; maps, nested lists, and non-finite floats have no
/// storable form and are rejected.
pub fn literal(value: &Value) -> Result<String, UnsupportedValue> {
    match value {
        Value::Null => Ok("\"\"".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => float_literal(*f),
        Value::String(s) => Ok(quoted(s)),
        Value::List(items) => list_literal(items),
        Value::Map(_) => Err(UnsupportedValue("map")),
    }
}

fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn float_literal(f: f64) -> Result<String, UnsupportedValue> {
    if !f.is_finite() {
        return Err(UnsupportedValue("non-finite float"));
    }
    // Debug formatting keeps the decimal point, so 30.0 stays a float
    // literal rather than collapsing into integer text.
    Ok(format!("{f:?}"))
}

fn list_literal(items: &[Value]) -> Result<String, UnsupportedValue> {
    let mut parts = Vec::with_capacity(items.len());
    let mut kind: Option<&'static str> = None;
    for item in items {
        let tag = match item {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            // Null normalizes to "", so it counts as a string element.
            Value::String(_) | Value::Null => "string",
            Value::List(_) => return Err(UnsupportedValue("nested list")),
            Value::Map(_) => return Err(UnsupportedValue("map in list")),
        };
        match kind {
            None => kind = Some(tag),
            Some(k) if k == tag => {}
            Some(_) => return Err(UnsupportedValue("mixed-type list")),
        }
        parts.push(literal(item)?);
    }
    Ok(format!("[{}]", parts.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_literals() {
        assert_eq!(literal(&Value::Null).unwrap(), "\"\"");
        assert_eq!(literal(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(literal(&Value::Int(-7)).unwrap(), "-7");
        assert_eq!(literal(&Value::from("Alice")).unwrap(), "\"Alice\"");
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(literal(&Value::Float(30.0)).unwrap(), "30.0");
        assert_eq!(literal(&Value::Float(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_non_finite_float_is_unsupported() {
        assert!(literal(&Value::Float(f64::NAN)).is_err());
        assert!(literal(&Value::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            literal(&Value::from(r#"say "hi""#)).unwrap(),
            r#""say \"hi\"""#
        );
        assert_eq!(literal(&Value::from(r"a\b")).unwrap(), r#""a\\b""#);
        assert_eq!(literal(&Value::from("line\nbreak")).unwrap(), "\"line\\nbreak\"");
        // The classic breakout attempt stays inside the literal.
        assert_eq!(
            literal(&Value::from(r#"x" RETURN n //"#)).unwrap(),
            r#""x\" RETURN n //""#
        );
    }

    #[test]
    fn test_homogeneous_lists() {
        let ints = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(literal(&ints).unwrap(), "[1, 2, 3]");

        let strings = Value::List(vec![Value::from("a"), Value::Null]);
        assert_eq!(literal(&strings).unwrap(), "[\"a\", \"\"]");
    }

    #[test]
    fn test_unstorable_shapes() {
        let mixed = Value::List(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(literal(&mixed).unwrap_err(), UnsupportedValue("mixed-type list"));

        let nested = Value::List(vec![Value::List(vec![])]);
        assert_eq!(literal(&nested).unwrap_err(), UnsupportedValue("nested list"));

        let map = Value::Map(Default::default());
        assert_eq!(literal(&map).unwrap_err(), UnsupportedValue("map"));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let value = Value::List(vec![Value::Float(0.25), Value::Float(2.0)]);
        assert_eq!(literal(&value).unwrap(), literal(&value).unwrap());
        assert_eq!(literal(&value).unwrap(), "[0.25, 2.0]");
    }
}
