use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The per-run variable table, in binding order.
pub type Variables = IndexMap<String, Value>;

/// A dynamically-typed value held in the variable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Num(f64),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Num(_) => "number",
            Value::List(_) => "list",
        }
    }

    /// Truthiness: empty strings, zero and NaN are false; lists are always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::List(_) => true,
        }
    }

    /// Numeric coercion used by arithmetic and ordering.
    ///
    /// Numeric strings parse (blank ones are 0), an empty list is 0 and a
    /// one-element list coerces its element. Anything else has no number.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => parse_number(s),
            Value::List(items) => match items.as_slice() {
                [] => Some(0.0),
                [single] => single.to_number(),
                _ => None,
            },
        }
    }

    /// Total number of values (this one included) and list nesting depth.
    pub fn measure(&self) -> (usize, usize) {
        match self {
            Value::List(items) => items.iter().fold((1, 1), |(count, depth), item| {
                let (c, d) = item.measure();
                (count + c, depth.max(d + 1))
            }),
            _ => (1, 0),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Num(n) => write!(f, "{}", format_number(*n)),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// Render a number the way the console shows it: integers without a
/// fractional part, `NaN`, `Infinity`, and no negative zero. Magnitudes of
/// 1e21 and above or below 1e-6 use exponent form (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    } else {
        format!("{}", n)
    }
}

/// Parse a numeric literal.
///
/// Surrounding whitespace is ignored and blank text is 0. Accepts decimal
/// notation with optional sign, fraction and exponent, `Infinity`, and
/// unsigned `0x`/`0o`/`0b` integers.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    let well_formed = s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return None;
    }
    s.parse::<f64>().ok()
}
