//! Resolved literal values and their JSON and stylesheet renderings.

use std::fmt;

use serde_json::Value;
use varsmith_graph::Literal;

/// A literal value after alias resolution.
///
/// Colors are already rendered as lowercase hex (`#rrggbb`, or `#rrggbbaa`
/// when translucent).
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Color(String),
    Number(f64),
    String(String),
    Boolean(bool),
}

impl ResolvedValue {
    /// Numeric view of the value, coercing the way design tools do:
    /// numeric strings parse, booleans are 0 or 1, anything else is 0.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            ResolvedValue::Number(n) => *n,
            ResolvedValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            ResolvedValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            ResolvedValue::Color(_) => 0.0,
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::Color(s) | ResolvedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// JSON form used for token `$value`s.
    pub fn to_json(&self) -> Value {
        match self {
            ResolvedValue::Color(hex) => Value::String(hex.clone()),
            ResolvedValue::Number(n) => json_number(*n),
            ResolvedValue::String(s) => Value::String(s.clone()),
            ResolvedValue::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl From<&Literal> for ResolvedValue {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Color(rgba) => ResolvedValue::Color(rgba.to_hex()),
            Literal::Number(n) => ResolvedValue::Number(*n),
            Literal::String(s) => ResolvedValue::String(s.clone()),
            Literal::Boolean(b) => ResolvedValue::Boolean(*b),
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Color(s) | ResolvedValue::String(s) => write!(f, "{}", s),
            ResolvedValue::Number(n) => write!(f, "{}", format_number(*n)),
            ResolvedValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// JSON number for `n`. Integral values serialize without a fraction
/// (`16`, not `16.0`); non-finite values become `0`.
pub fn json_number(n: f64) -> Value {
    if !n.is_finite() {
        return Value::from(0);
    }
    if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

/// Shortest text form of `n`: `16`, `1.5`, `-0.25`. Non-finite values and
/// negative zero print as `0`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() || n == 0.0 {
        return "0".to_string();
    }
    format!("{}", n)
}
