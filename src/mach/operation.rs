use super::val::{parse_float_prefix, parse_int_prefix};
use super::Value;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Value arithmetic, comparison and conversion
///
/// Integer arithmetic that overflows continues in floating point.

pub struct Operation {}

fn type_mismatch(op: &str, lhs: &Value, rhs: &Value) -> Error {
    error!(TypeMismatch; format!("{} {:?} {:?}", op, lhs, rhs))
}

impl Operation {
    pub fn increment(val: Value) -> Result<Value> {
        Operation::add(val, Value::Integer(1))
    }

    pub fn decrement(val: Value) -> Result<Value> {
        Operation::subtract(val, Value::Integer(1))
    }

    pub fn add(lhs: Value, rhs: Value) -> Result<Value> {
        use Value::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => Ok(match l.checked_add(*r) {
                Some(n) => Integer(n),
                None => Float(*l as f64 + *r as f64),
            }),
            (Text(_), _) | (_, Text(_)) => Ok(Text(format!("{}{}", lhs, rhs))),
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(l), Some(r)) => Ok(Float(l + r)),
                _ => Err(type_mismatch("ADD", &lhs, &rhs)),
            },
        }
    }

    pub fn subtract(lhs: Value, rhs: Value) -> Result<Value> {
        use Value::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => Ok(match l.checked_sub(*r) {
                Some(n) => Integer(n),
                None => Float(*l as f64 - *r as f64),
            }),
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(l), Some(r)) => Ok(Float(l - r)),
                _ => Err(type_mismatch("SUB", &lhs, &rhs)),
            },
        }
    }

    pub fn multiply(lhs: Value, rhs: Value) -> Result<Value> {
        use Value::*;
        match (&lhs, &rhs) {
            (Integer(l), Integer(r)) => Ok(match l.checked_mul(*r) {
                Some(n) => Integer(n),
                None => Float(*l as f64 * *r as f64),
            }),
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(l), Some(r)) => Ok(Float(l * r)),
                _ => Err(type_mismatch("MUL", &lhs, &rhs)),
            },
        }
    }

    /// Always a floating quotient.
    pub fn divide(lhs: Value, rhs: Value) -> Result<Value> {
        match (lhs.as_f64(), rhs.as_f64()) {
            (Some(l), Some(r)) => Ok(Value::Float(l / r)),
            _ => Err(type_mismatch("DIV", &lhs, &rhs)),
        }
    }

    /// Remainder takes the sign of the dividend.
    pub fn modulus(lhs: Value, rhs: Value) -> Result<Value> {
        use Value::*;
        if let (Integer(l), Integer(r)) = (&lhs, &rhs) {
            if let Some(n) = l.checked_rem(*r) {
                return Ok(Integer(n));
            }
        }
        match (lhs.as_f64(), rhs.as_f64()) {
            (Some(l), Some(r)) => Ok(Float(l % r)),
            _ => Err(type_mismatch("MOD", &lhs, &rhs)),
        }
    }

    pub fn equal(lhs: &Value, rhs: &Value) -> Value {
        use Value::*;
        let eq = match (lhs, rhs) {
            (Integer(l), Integer(r)) => l == r,
            (Text(l), Text(r)) => l == r,
            (Null, Null) => true,
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(l), Some(r)) => l == r,
                _ => false,
            },
        };
        Value::from_bool(eq)
    }

    pub fn less(lhs: &Value, rhs: &Value) -> Result<Value> {
        Operation::order("LESS", lhs, rhs, |o| o == Ordering::Less)
    }

    pub fn more(lhs: &Value, rhs: &Value) -> Result<Value> {
        Operation::order("MORE", lhs, rhs, |o| o == Ordering::Greater)
    }

    pub fn less_equal(lhs: &Value, rhs: &Value) -> Result<Value> {
        Operation::order("LESSEQ", lhs, rhs, |o| o != Ordering::Greater)
    }

    pub fn more_equal(lhs: &Value, rhs: &Value) -> Result<Value> {
        Operation::order("MOREEQ", lhs, rhs, |o| o != Ordering::Less)
    }

    fn order<F>(op: &str, lhs: &Value, rhs: &Value, test: F) -> Result<Value>
    where
        F: Fn(Ordering) -> bool,
    {
        use Value::*;
        let ordering = match (lhs, rhs) {
            (Integer(l), Integer(r)) => Some(l.cmp(r)),
            (Text(l), Text(r)) => Some(l.cmp(r)),
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                // NaN compares false every way.
                (Some(l), Some(r)) => match l.partial_cmp(&r) {
                    Some(o) => Some(o),
                    None => return Ok(Value::from_bool(false)),
                },
                _ => None,
            },
        };
        match ordering {
            Some(o) => Ok(Value::from_bool(test(o))),
            None => Err(type_mismatch(op, lhs, rhs)),
        }
    }

    pub fn make_int(val: Value) -> Value {
        use Value::*;
        match val {
            Integer(n) => Integer(n),
            Float(n) if n.is_finite() => Integer(n.trunc() as i64),
            Float(_) | Null => Null,
            Text(s) => match parse_int_prefix(&s) {
                Some(n) => Integer(n),
                None => Null,
            },
        }
    }

    pub fn make_float(val: Value) -> Value {
        use Value::*;
        match val {
            Integer(_) | Float(_) | Null => val,
            Text(s) => match parse_float_prefix(&s) {
                Some(n) => Float(n),
                None => Null,
            },
        }
    }

    pub fn make_string(val: Value) -> Value {
        match val {
            Value::Text(_) => val,
            _ => Value::Text(val.to_string()),
        }
    }

    pub fn ord(val: Value) -> Value {
        match val {
            Value::Text(s) => match s.chars().next() {
                Some(c) => Value::Integer(c as i64),
                None => Value::Null,
            },
            _ => Value::Null,
        }
    }

    pub fn chr(val: Value) -> Value {
        let code = match val {
            Value::Integer(n) => n,
            Value::Float(n) if n.fract() == 0.0 => n as i64,
            _ => return Value::Null,
        };
        if code < 0 || code > u32::max_value() as i64 {
            return Value::Null;
        }
        match std::char::from_u32(code as u32) {
            Some(c) => Value::Text(c.to_string()),
            None => Value::Null,
        }
    }
}
