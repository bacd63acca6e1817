//! Parameter value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Scalar candidate value
///
/// Floats compare and hash by bit pattern so resolved configurations can be
/// kept in a hash set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Get as int (floats and bools are not lengths)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::Bool(a), ParamValue::Bool(b)) => a == b,
            (ParamValue::Int(a), ParamValue::Int(b)) => a == b,
            (ParamValue::Float(a), ParamValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ParamValue::Str(a), ParamValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ParamValue {}

impl Hash for ParamValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ParamValue::Bool(v) => v.hash(state),
            ParamValue::Int(v) => v.hash(state),
            ParamValue::Float(v) => v.to_bits().hash(state),
            ParamValue::Str(v) => v.hash(state),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(true) => f.write_str("True"),
            ParamValue::Bool(false) => f.write_str("False"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write_float(f, *v),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

/// Shortest round-trip float text used in run tags
///
/// Whole numbers keep a trailing `.0`; magnitudes below `1e-4` or from `1e16`
/// up switch to an exponent with a sign and at least two digits (`1e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{v:e}");
    let exponent = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));
    match exponent {
        Some((mantissa, exp)) if v != 0.0 && !(-4..16).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ if v.fract() == 0.0 => write!(f, "{v:.1}"),
        _ => write!(f, "{v}"),
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

/// Resolved value of one parameter in a configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    /// Independent parameter
    Scalar(ParamValue),
    /// Parameter whose length comes from another parameter, or an overlay tuple
    Tuple(Vec<ParamValue>),
}

impl ResolvedValue {
    /// Get the scalar, if this is one
    pub fn as_scalar(&self) -> Option<&ParamValue> {
        match self {
            ResolvedValue::Scalar(v) => Some(v),
            ResolvedValue::Tuple(_) => None,
        }
    }

    /// Get the tuple elements, if this is a tuple
    pub fn as_tuple(&self) -> Option<&[ParamValue]> {
        match self {
            ResolvedValue::Tuple(v) => Some(v),
            ResolvedValue::Scalar(_) => None,
        }
    }

    /// Boolean `false` scalars are omitted from configurations
    pub fn is_false_flag(&self) -> bool {
        matches!(self, ResolvedValue::Scalar(ParamValue::Bool(false)))
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Scalar(v) => write!(f, "{v}"),
            ResolvedValue::Tuple(values) => {
                f.write_str("(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
        }
    }
}
