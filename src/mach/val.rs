use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack value
///
/// Booleans have no variant of their own; they are `Integer(1)` and `Integer(0)`.

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    pub fn from_bool(b: bool) -> Value {
        Value::Integer(if b { 1 } else { 0 })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Text(_) | Value::Null => None,
        }
    }

    /// Interpret as a jump target.
    pub fn as_line_number(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(n) if n.is_finite() => Some(n.trunc() as i64),
            Value::Float(_) | Value::Null => None,
            Value::Text(s) => parse_int_prefix(s),
        }
    }
}

/// Parse one parameter literal: JSON numbers, strings and booleans,
/// `null`, or the bare token `NULL`.
pub fn parse_literal(raw: &str) -> Result<Value> {
    let raw = raw.trim();
    if raw == "NULL" {
        return Ok(Value::Null);
    }
    let json: serde_json::Value = match serde_json::from_str(raw) {
        Ok(json) => json,
        Err(e) => return Err(error!(SyntaxError; format!("BAD LITERAL {}: {}", raw, e))),
    };
    use serde_json::Value as Json;
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::from_bool(b)),
        Json::String(s) => Ok(Value::Text(s)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => match n.as_f64() {
                Some(f) => Ok(Value::Float(f)),
                None => Err(error!(SyntaxError; format!("BAD NUMBER {}", raw))),
            },
        },
        Json::Array(_) | Json::Object(_) => {
            Err(error!(SyntaxError; format!("UNSUPPORTED LITERAL {}", raw)))
        }
    }
}

/// Leading optional sign and decimal digits, ignoring leading whitespace.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.chars().next() {
        Some('-') => (true, &s[1..]),
        Some('+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.chars().take_while(|c| c.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    let n = digits[..len].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}

/// Longest leading decimal float, ignoring leading whitespace.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'-' || bytes[exp_end] == b'+') {
            exp_end += 1;
        }
        let exp_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Finite floats the way a JavaScript number prints: plain decimal
/// between 1e-6 and 1e21, exponent form with an explicit sign outside.
fn fmt_number(f: &mut std::fmt::Formatter, n: f64) -> std::fmt::Result {
    if n == 0.0 {
        return write!(f, "0");
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return write!(f, "{}", n);
    }
    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
        _ => write!(f, "{}", s),
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) if n.is_nan() => write!(f, "NaN"),
            Value::Float(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(n) => fmt_number(f, *n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
        }
    }
}
