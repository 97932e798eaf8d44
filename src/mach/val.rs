use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Dynamically typed value
///
/// Reals with no fractional part that fit in an `i32` are stored as integers.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Null,
    Integer(i32),
    Real(f32),
    String(Rc<str>),
    Boolean(bool),
}

impl Default for Val {
    fn default() -> Val {
        Val::Null
    }
}

impl From<f32> for Val {
    fn from(n: f32) -> Val {
        if n.is_finite() && n.fract() == 0.0 && n >= i32::MIN as f32 && n < i32::MAX as f32 {
            Val::Integer(n as i32)
        } else {
            Val::Real(n)
        }
    }
}

impl From<i32> for Val {
    fn from(n: i32) -> Val {
        Val::Integer(n)
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Val {
        Val::Boolean(b)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Val {
        Val::String(s.into())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Val {
        Val::String(s.into())
    }
}

impl TryFrom<Val> for i32 {
    type Error = Error;

    fn try_from(val: Val) -> Result<i32> {
        match val {
            Val::Integer(n) => Ok(n),
            Val::Real(n) => {
                let n = n.trunc();
                if n >= i32::MIN as f32 && n < i32::MAX as f32 {
                    Ok(n as i32)
                } else {
                    Err(error!(Overflow))
                }
            }
            Val::Boolean(b) => Ok(b as i32),
            Val::String(_) | Val::Null => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for f32 {
    type Error = Error;

    fn try_from(val: Val) -> Result<f32> {
        match val {
            Val::Integer(n) => Ok(n as f32),
            Val::Real(n) => Ok(n),
            Val::Boolean(b) => Ok(b as i32 as f32),
            Val::String(_) | Val::Null => Err(error!(TypeMismatch)),
        }
    }
}

impl Val {
    /// Parse a typed number as INPUT and VAL read it.
    pub fn from_number_str(s: &str) -> Option<Val> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Some(Val::Integer(n));
        }
        match s.parse::<f32>() {
            Ok(n) if n.is_finite() => Some(Val::from(n)),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Val::Integer(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Val::Real(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Val::Integer(_) | Val::Real(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Val::String(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Null => "NULL",
            Val::Integer(_) => "INTEGER",
            Val::Real(_) => "REAL",
            Val::String(_) => "STRING",
            Val::Boolean(_) => "BOOLEAN",
        }
    }

    pub fn boolean(&self) -> bool {
        match self {
            Val::Null => false,
            Val::Integer(n) => *n != 0,
            Val::Real(n) => *n != 0.0,
            Val::String(s) => !s.is_empty(),
            Val::Boolean(b) => *b,
        }
    }

    fn real(&self) -> Option<f32> {
        match self {
            Val::Integer(n) => Some(*n as f32),
            Val::Real(n) => Some(*n),
            _ => None,
        }
    }

    pub fn equals(&self, other: &Val) -> bool {
        if let (Some(l), Some(r)) = (self.real(), other.real()) {
            return l == r;
        }
        match (self, other) {
            (Val::Null, _) | (_, Val::Null) => false,
            (Val::String(l), Val::String(r)) => l == r,
            _ => self.boolean() == other.boolean(),
        }
    }

    pub fn is_greater_than(&self, other: &Val) -> bool {
        if let (Some(l), Some(r)) = (self.real(), other.real()) {
            return l > r;
        }
        match (self, other) {
            (Val::String(l), Val::String(r)) => l > r,
            _ => false,
        }
    }

    pub fn is_less_than(&self, other: &Val) -> bool {
        if let (Some(l), Some(r)) = (self.real(), other.real()) {
            return l < r;
        }
        match (self, other) {
            (Val::String(l), Val::String(r)) => l < r,
            _ => false,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Null => Ok(()),
            Val::Integer(n) => write!(f, "{}", n),
            Val::Real(n) => write!(f, "{}", real_to_string(*n)),
            Val::String(s) => write!(f, "{}", s),
            Val::Boolean(b) => write!(f, "{}", if *b { "1" } else { "0" }),
        }
    }
}

fn real_to_string(n: f32) -> String {
    let s = format!("{:.6}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if (s == "0" || s == "-0") && n != 0.0 {
        return format!("{}", n);
    }
    s.to_string()
}
