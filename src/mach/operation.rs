use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Operator tables
///
/// Integer operands stay integer for `+ - *` unless the result overflows.
/// Any real operand makes the result real. `/` is always real division.

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            Real(n) => Ok(Val::from(-n)),
            String(_) | Boolean(_) | Null => Err(error!(TypeMismatch)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        let (l, r) = match (lhs, rhs) {
            (Integer(l), Integer(r)) => (l as f32, r as f32),
            (Integer(l), Real(r)) => (l as f32, r),
            (Real(l), Integer(r)) => (l, r as f32),
            (Real(l), Real(r)) => (l, r),
            _ => return Err(error!(TypeMismatch)),
        };
        Operation::real_result(l.powf(r))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => match l.checked_mul(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Real(r) => Operation::real_result(l as f32 * r),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Integer(r) => Operation::real_result(l * r as f32),
                Real(r) => Operation::real_result(l * r),
                _ => Err(error!(TypeMismatch)),
            },
            String(_) | Boolean(_) | Null => Err(error!(TypeMismatch)),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        let (l, r) = match (lhs, rhs) {
            (Integer(l), Integer(r)) => (l as f32, r as f32),
            (Integer(l), Real(r)) => (l as f32, r),
            (Real(l), Integer(r)) => (l, r as f32),
            (Real(l), Real(r)) => (l, r),
            _ => return Err(error!(TypeMismatch)),
        };
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Operation::real_result(l / r)
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            String(l) => match rhs {
                String(r) => Ok(String((l.to_string() + &r).into())),
                _ => Err(error!(TypeMismatch)),
            },
            Integer(l) => match rhs {
                Integer(r) => match l.checked_add(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Real(r) => Operation::real_result(l as f32 + r),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Integer(r) => Operation::real_result(l + r as f32),
                Real(r) => Operation::real_result(l + r),
                _ => Err(error!(TypeMismatch)),
            },
            Boolean(_) | Null => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => match l.checked_sub(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Real(r) => Operation::real_result(l as f32 - r),
                _ => Err(error!(TypeMismatch)),
            },
            Real(l) => match rhs {
                Integer(r) => Operation::real_result(l - r as f32),
                Real(r) => Operation::real_result(l - r),
                _ => Err(error!(TypeMismatch)),
            },
            String(_) | Boolean(_) | Null => Err(error!(TypeMismatch)),
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::comparable(&lhs, &rhs)?;
        Ok(Val::Boolean(lhs.equals(&rhs)))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::comparable(&lhs, &rhs)?;
        Ok(Val::Boolean(!lhs.equals(&rhs)))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::comparable(&lhs, &rhs)?;
        Ok(Val::Boolean(lhs.is_less_than(&rhs)))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::comparable(&lhs, &rhs)?;
        Ok(Val::Boolean(lhs.is_less_than(&rhs) || lhs.equals(&rhs)))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::comparable(&lhs, &rhs)?;
        Ok(Val::Boolean(lhs.is_greater_than(&rhs)))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Operation::comparable(&lhs, &rhs)?;
        Ok(Val::Boolean(lhs.is_greater_than(&rhs) || lhs.equals(&rhs)))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(lhs.boolean() && rhs.boolean()))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Boolean(lhs.boolean() || rhs.boolean()))
    }

    pub fn not(val: Val) -> Result<Val> {
        Ok(Val::Boolean(!val.boolean()))
    }

    fn comparable(lhs: &Val, rhs: &Val) -> Result<()> {
        if (lhs.is_string() && rhs.is_numeric()) || (lhs.is_numeric() && rhs.is_string()) {
            Err(error!(TypeMismatch))
        } else {
            Ok(())
        }
    }

    fn real_result(n: f32) -> Result<Val> {
        if n.is_finite() {
            Ok(Val::from(n))
        } else if n.is_nan() {
            Err(error!(IllegalFunctionCall))
        } else {
            Err(error!(Overflow))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_stays_integer() {
        assert_eq!(
            Operation::sum(Val::Integer(2), Val::Integer(3)).unwrap(),
            Val::Integer(5)
        );
        assert_eq!(
            Operation::multiply(Val::Integer(4), Val::Real(0.5)).unwrap(),
            Val::Integer(2)
        );
        assert_eq!(
            Operation::sum(Val::Real(0.5), Val::Real(0.5)).unwrap(),
            Val::Integer(1)
        );
        assert_eq!(
            Operation::subtract(Val::Real(2.5), Val::Real(0.5)).unwrap(),
            Val::Integer(2)
        );
        assert_eq!(
            Operation::sum(Val::Real(0.5), Val::Integer(1)).unwrap(),
            Val::Real(1.5)
        );
        assert_eq!(
            Operation::sum(Val::Integer(i32::MAX), Val::Integer(1))
                .unwrap_err()
                .code(),
            6
        );
    }

    #[test]
    fn test_divide_is_real() {
        assert_eq!(
            Operation::divide(Val::Integer(7), Val::Integer(2)).unwrap(),
            Val::Real(3.5)
        );
        assert_eq!(
            Operation::divide(Val::Integer(1), Val::Integer(0))
                .unwrap_err()
                .code(),
            11
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            Operation::sum(Val::from("AB"), Val::from("CD")).unwrap(),
            Val::from("ABCD")
        );
        assert_eq!(
            Operation::sum(Val::from("AB"), Val::Integer(1))
                .unwrap_err()
                .code(),
            13
        );
        assert_eq!(
            Operation::less(Val::from("A"), Val::Integer(1))
                .unwrap_err()
                .code(),
            13
        );
        assert_eq!(
            Operation::less(Val::from("A"), Val::from("B")).unwrap(),
            Val::Boolean(true)
        );
    }

    #[test]
    fn test_negate_keeps_subtype() {
        assert_eq!(Operation::negate(Val::Integer(3)).unwrap(), Val::Integer(-3));
        assert_eq!(Operation::negate(Val::Real(1.5)).unwrap(), Val::Real(-1.5));
        assert!(Operation::negate(Val::from("x")).is_err());
    }

    #[test]
    fn test_logic() {
        assert_eq!(
            Operation::and(Val::Integer(1), Val::from("")).unwrap(),
            Val::Boolean(false)
        );
        assert_eq!(
            Operation::or(Val::Integer(0), Val::Real(0.5)).unwrap(),
            Val::Boolean(true)
        );
        assert_eq!(Operation::not(Val::Null).unwrap(), Val::Boolean(true));
        assert_eq!(
            Operation::power(Val::Integer(2), Val::Integer(10)).unwrap(),
            Val::Integer(1024)
        );
    }
}
