use super::Val;
use crate::error;
use crate::lang::Error;
use rand::{rngs::StdRng, Rng};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Built-in functions
///
/// `TAB` and `INKEY$` touch the console and live in the runtime.

pub struct Function {}

impl Function {
    pub fn abs(val: Val) -> Result<Val> {
        match val {
            Val::Integer(n) => match n.checked_abs() {
                Some(n) => Ok(Val::Integer(n)),
                None => Err(error!(Overflow)),
            },
            Val::Real(n) => Ok(Val::from(n.abs())),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn asc(val: Val) -> Result<Val> {
        match val {
            Val::String(s) => match s.chars().next() {
                Some(ch) => Ok(Val::Integer(ch as i32)),
                None => Err(error!(IllegalFunctionCall; "EMPTY STRING")),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn chr(val: Val) -> Result<Val> {
        let n = Function::number(val)?;
        match u8::try_from(n) {
            Ok(n) => Ok(Val::String(char::from(n).to_string().into())),
            Err(_) => Ok(Val::String("".into())),
        }
    }

    pub fn int(val: Val) -> Result<Val> {
        match val {
            Val::Integer(_) => Ok(val),
            Val::Real(n) => Ok(Val::from(n.trunc())),
            Val::String(s) => match Val::from_number_str(&s) {
                Some(n) => Function::int(n),
                None => Err(error!(TypeMismatch)),
            },
            Val::Boolean(_) | Val::Null => Err(error!(TypeMismatch)),
        }
    }

    pub fn left(string: Val, len: Val) -> Result<Val> {
        let s = Function::string(string)?;
        let len = Function::length(len)?;
        Ok(Val::String(s.chars().take(len).collect::<String>().into()))
    }

    pub fn len(val: Val) -> Result<Val> {
        let s = Function::string(val)?;
        Ok(Val::Integer(s.chars().count() as i32))
    }

    /// `MID$(s, start[, len])` with `start` counted from 1.
    pub fn mid(string: Val, start: Val, len: Option<Val>) -> Result<Val> {
        let s = Function::string(string)?;
        let start = Function::length(start)?;
        if start == 0 {
            return Err(error!(IllegalFunctionCall));
        }
        let chars = s.chars().skip(start - 1);
        let sub: String = match len {
            Some(len) => chars.take(Function::length(len)?).collect(),
            None => chars.collect(),
        };
        Ok(Val::String(sub.into()))
    }

    pub fn right(string: Val, len: Val) -> Result<Val> {
        let s = Function::string(string)?;
        let len = Function::length(len)?;
        let count = s.chars().count();
        let skip = count.saturating_sub(len);
        Ok(Val::String(s.chars().skip(skip).collect::<String>().into()))
    }

    /// `RND(0)` is uniform in [0,1). Otherwise an integer from 1 to |n|.
    pub fn rnd(rng: &mut StdRng, val: Val) -> Result<Val> {
        let n = Function::number(val)?;
        if n == 0 {
            return Ok(Val::from(rng.gen::<f32>()));
        }
        let n = n.checked_abs().unwrap_or(i32::MAX);
        Ok(Val::Integer(rng.gen_range(1..=n)))
    }

    pub fn sqr(val: Val) -> Result<Val> {
        let n = f32::try_from(match val {
            Val::String(_) | Val::Boolean(_) | Val::Null => return Err(error!(TypeMismatch)),
            _ => val,
        })?;
        if n < 0.0 {
            return Err(error!(IllegalFunctionCall));
        }
        Ok(Val::from(n.sqrt()))
    }

    pub fn str(val: Val) -> Result<Val> {
        match val {
            Val::String(_) => Ok(val),
            _ => Ok(Val::String(val.to_string().into())),
        }
    }

    pub fn val(val: Val) -> Result<Val> {
        match val {
            Val::String(s) => Ok(Val::from_number_str(&s).unwrap_or(Val::Integer(0))),
            Val::Integer(_) | Val::Real(_) => Ok(val),
            Val::Boolean(_) | Val::Null => Err(error!(TypeMismatch)),
        }
    }

    fn number(val: Val) -> Result<i32> {
        match val {
            Val::Integer(_) | Val::Real(_) => i32::try_from(val),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn length(val: Val) -> Result<usize> {
        let n = Function::number(val)?;
        usize::try_from(n).map_err(|_| error!(IllegalFunctionCall))
    }

    fn string(val: Val) -> Result<std::rc::Rc<str>> {
        match val {
            Val::String(s) => Ok(s),
            _ => Err(error!(TypeMismatch)),
        }
    }
}
