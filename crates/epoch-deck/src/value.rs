// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Deck Values
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;

use serde::Serialize;

/// A deck value.
///
/// Anything that is not a plain number or `T`/`F` stays a string, so
/// expressions such as `if((r gt ri), den_cone, 0.0)` pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Values of a key repeated within one block, in file order.
    List(Vec<Value>),
}

impl Value {
    pub fn parse(raw: &str) -> Value {
        let s = raw.trim();
        match s {
            "T" => return Value::Bool(true),
            "F" => return Value::Bool(false),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "true" | ".true." => return Value::Bool(true),
            "false" | ".false." => return Value::Bool(false),
            _ => {}
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Int(i);
        }
        // Require a digit so identifiers like `inf` or `nan` stay strings.
        if s.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = s.parse::<f64>() {
                return Value::Float(f);
            }
        }
        Value::Str(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Scalars of this value: itself, or the items of a list.
    pub fn items(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            scalar => std::slice::from_ref(scalar),
        }
    }

    /// Check that dumping this value and parsing it back gives it again.
    pub fn check_writable(&self) -> Result<(), String> {
        match self {
            Value::List(items) => {
                if items.len() < 2 {
                    return Err("a repeated key needs at least two values".into());
                }
                items.iter().try_for_each(|item| match item {
                    Value::List(_) => Err("nested lists cannot be written".into()),
                    scalar => scalar.check_writable(),
                })
            }
            scalar => {
                let text = scalar.to_string();
                if text.contains(['#', '\n', '\r']) {
                    return Err(format!("{text:?} contains a comment marker or line break"));
                }
                let reparsed = Value::parse(&text);
                if reparsed != *scalar {
                    return Err(format!("{scalar:?} would read back as {reparsed:?}"));
                }
                Ok(())
            }
        }
    }

    /// Append a repeated occurrence, turning a scalar into a list.
    pub(crate) fn push(&mut self, next: Value) {
        match self {
            Value::List(items) => items.push(next),
            scalar => {
                let first = std::mem::replace(scalar, Value::List(Vec::new()));
                *scalar = Value::List(vec![first, next]);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the shortest round-trip form and a decimal point.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(true) => f.write_str("T"),
            Value::Bool(false) => f.write_str("F"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(Value::parse("256"), Value::Int(256));
        assert_eq!(Value::parse("-1.0"), Value::Float(-1.0));
        assert_eq!(Value::parse("1.0e22"), Value::Float(1.0e22));
        assert_eq!(Value::parse("T"), Value::Bool(true));
        assert_eq!(Value::parse(".false."), Value::Bool(false));
        assert_eq!(Value::parse(" Electron "), Value::Str("Electron".into()));
        assert_eq!(Value::parse("50 * femto"), Value::Str("50 * femto".into()));
        assert_eq!(Value::parse("inf"), Value::Str("inf".into()));
    }

    #[test]
    fn test_float_display_reparses_as_float() {
        for x in [1.0, 0.5, 1.0e22, -3.25e-15, 1836.2] {
            let text = Value::Float(x).to_string();
            assert_eq!(Value::parse(&text), Value::Float(x), "text = {text}");
        }
    }

    #[test]
    fn test_writable_values() {
        for ok in [
            Value::Int(5),
            Value::Float(0.5),
            Value::Bool(false),
            Value::Str("50 * femto".into()),
            Value::Str(String::new()),
            Value::List(vec![Value::Int(1), Value::Str("x_max".into())]),
        ] {
            assert!(ok.check_writable().is_ok(), "{ok:?}");
        }
        for bad in [
            Value::Str("5".into()),
            Value::Str("T".into()),
            Value::Str(" padded".into()),
            Value::Str("a # b".into()),
            Value::Str("two\nlines".into()),
            Value::Float(f64::NAN),
            Value::Float(f64::INFINITY),
            Value::List(vec![Value::Int(1)]),
            Value::List(vec![Value::Int(1), Value::List(vec![])]),
        ] {
            assert!(bad.check_writable().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_push_builds_list() {
        let mut v = Value::parse("den_cone");
        v.push(Value::parse("0.0"));
        v.push(Value::parse("1"));
        assert_eq!(v.items().len(), 3);
        assert_eq!(v.items()[2], Value::Int(1));
    }
}
